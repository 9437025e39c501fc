//! Configuration file support
//!
//! Loads subify configuration from TOML files. Every section is optional;
//! missing values fall back to the defaults in [`SubifyConfig`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{
    CaptionConfig, PreferenceConfig, SubifyConfig, TooltipConfig, TranslationConfig,
};
use crate::error::{Result, SubifyError};

/// Configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Translation endpoint settings
    pub translation: Option<TranslationSettings>,
    /// Tooltip settings
    pub tooltip: Option<TooltipSettings>,
    /// Caption discovery settings
    pub captions: Option<CaptionSettings>,
    /// Preference storage settings
    pub preferences: Option<PreferenceSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSettings {
    /// MyMemory `get` endpoint
    pub endpoint: Option<String>,
    /// Caption source language
    pub source_language: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipSettings {
    /// Visible lifetime in milliseconds
    pub duration_ms: Option<u64>,
    /// Fade-out in milliseconds
    pub fade_ms: Option<u64>,
    /// Maximum width in pixels
    pub max_width: Option<u32>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionSettings {
    /// Caption segment class name
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceSettings {
    pub storage_key: Option<String>,
    pub default_language: Option<String>,
    pub enabled_languages: Option<Vec<String>>,
    pub storage_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile =
            toml::from_str(&content).map_err(|e| SubifyError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SubifyError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file contents
    pub fn default_config() -> Self {
        let defaults = SubifyConfig::default();
        Self {
            translation: Some(TranslationSettings {
                endpoint: Some(defaults.translation.endpoint),
                source_language: Some(defaults.translation.source_language),
                timeout_ms: Some(defaults.translation.timeout_ms),
            }),
            tooltip: Some(TooltipSettings {
                duration_ms: Some(defaults.tooltip.duration_ms),
                fade_ms: Some(defaults.tooltip.fade_ms),
                max_width: Some(defaults.tooltip.max_width),
                offset_x: Some(defaults.tooltip.offset_x),
                offset_y: Some(defaults.tooltip.offset_y),
            }),
            captions: Some(CaptionSettings {
                class_name: Some(defaults.captions.class_name),
            }),
            preferences: Some(PreferenceSettings {
                storage_key: Some(defaults.preferences.storage_key),
                default_language: Some(defaults.preferences.default_language),
                enabled_languages: Some(defaults.preferences.enabled_languages),
                storage_path: Some(defaults.preferences.storage_path),
            }),
            logging: Some(LoggingSettings {
                level: Some(defaults.log_level),
                format: Some(defaults.log_format),
            }),
        }
    }

    /// Convert to SubifyConfig
    pub fn into_config(self) -> SubifyConfig {
        let translation = match self.translation {
            Some(t) => {
                let d = TranslationConfig::default();
                TranslationConfig {
                    endpoint: t.endpoint.unwrap_or(d.endpoint),
                    source_language: t.source_language.unwrap_or(d.source_language),
                    timeout_ms: t.timeout_ms.unwrap_or(d.timeout_ms),
                }
            }
            None => TranslationConfig::default(),
        };

        let tooltip = match self.tooltip {
            Some(t) => {
                let d = TooltipConfig::default();
                TooltipConfig {
                    duration_ms: t.duration_ms.unwrap_or(d.duration_ms),
                    fade_ms: t.fade_ms.unwrap_or(d.fade_ms),
                    max_width: t.max_width.unwrap_or(d.max_width),
                    offset_x: t.offset_x.unwrap_or(d.offset_x),
                    offset_y: t.offset_y.unwrap_or(d.offset_y),
                }
            }
            None => TooltipConfig::default(),
        };

        let captions = match self.captions {
            Some(c) => CaptionConfig {
                class_name: c.class_name.unwrap_or(CaptionConfig::default().class_name),
            },
            None => CaptionConfig::default(),
        };

        let preferences = match self.preferences {
            Some(p) => {
                let d = PreferenceConfig::default();
                PreferenceConfig {
                    storage_key: p.storage_key.unwrap_or(d.storage_key),
                    default_language: p.default_language.unwrap_or(d.default_language),
                    enabled_languages: p.enabled_languages.unwrap_or(d.enabled_languages),
                    storage_path: p.storage_path.unwrap_or(d.storage_path),
                }
            }
            None => PreferenceConfig::default(),
        };

        let (log_level, log_format) = match self.logging {
            Some(l) => (l.level, l.format),
            None => (None, None),
        };
        let d = SubifyConfig::default();

        SubifyConfig {
            log_level: log_level.unwrap_or(d.log_level),
            log_format: log_format.unwrap_or(d.log_format),
            translation,
            tooltip,
            captions,
            preferences,
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    ConfigFile::default_config().to_file(path)
}
