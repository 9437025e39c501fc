//! Extension install/update notifications
//!
//! Only logged; nothing is persisted.

use serde::{Deserialize, Serialize};

/// Why the host delivered an installed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallReason {
    Install,
    Update,
    ChromeUpdate,
    SharedModuleUpdate,
}

/// Payload of an installed notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledDetails {
    pub reason: InstallReason,
    #[serde(default)]
    pub previous_version: Option<String>,
}

/// Log an installed notification and return the message that was logged.
pub fn handle_installed(details: &InstalledDetails) -> String {
    let message = match (details.reason, details.previous_version.as_deref()) {
        (InstallReason::Install, _) => "Extension installed for the first time".to_string(),
        (InstallReason::Update, Some(previous)) => {
            format!("Extension updated from version {}", previous)
        }
        (InstallReason::Update, None) => "Extension updated".to_string(),
        (InstallReason::ChromeUpdate, _) => "Browser updated".to_string(),
        (InstallReason::SharedModuleUpdate, _) => "Shared module updated".to_string(),
    };
    tracing::info!(reason = ?details.reason, "{}", message);
    message
}
