//! Runtime configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Translation endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Base URL of the MyMemory `get` endpoint
    pub endpoint: String,

    /// Language the captions are written in
    pub source_language: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mymemory.translated.net/get".to_string(),
            source_language: "en".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Tooltip rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// How long a tooltip stays fully visible, in milliseconds
    pub duration_ms: u64,

    /// Fade-out length before removal, in milliseconds
    pub fade_ms: u64,

    /// Maximum tooltip width in pixels
    pub max_width: u32,

    /// Horizontal distance from the cursor
    pub offset_x: f64,

    /// Vertical distance from the cursor
    pub offset_y: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            fade_ms: 300,
            max_width: 200,
            offset_x: 15.0,
            offset_y: 10.0,
        }
    }
}

impl TooltipConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Caption discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionConfig {
    /// Class name carried by caption segment elements
    pub class_name: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            class_name: "ytp-caption-segment".to_string(),
        }
    }
}

/// Preference storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceConfig {
    /// Key the target language is stored under
    pub storage_key: String,

    /// Language used when nothing usable is stored
    pub default_language: String,

    /// Languages that may be selected today
    pub enabled_languages: Vec<String>,

    /// Backing file for the CLI's storage area
    pub storage_path: PathBuf,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            storage_key: "targetLang".to_string(),
            default_language: "si".to_string(),
            enabled_languages: vec!["si".to_string()],
            storage_path: PathBuf::from("subify-prefs.json"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubifyConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    pub translation: TranslationConfig,
    pub tooltip: TooltipConfig,
    pub captions: CaptionConfig,
    pub preferences: PreferenceConfig,
}

impl Default for SubifyConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            translation: TranslationConfig::default(),
            tooltip: TooltipConfig::default(),
            captions: CaptionConfig::default(),
            preferences: PreferenceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SubifyConfig::default();
        assert_eq!(config.tooltip.duration_ms, 2000);
        assert_eq!(config.tooltip.fade_ms, 300);
        assert_eq!(config.captions.class_name, "ytp-caption-segment");
        assert_eq!(config.preferences.default_language, "si");
        assert_eq!(config.preferences.storage_key, "targetLang");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_durations() {
        let tooltip = TooltipConfig {
            duration_ms: 4500,
            ..Default::default()
        };
        assert_eq!(tooltip.lifetime(), Duration::from_millis(4500));
        assert_eq!(TranslationConfig::default().timeout(), Duration::from_secs(5));
    }
}
