//! Application configuration models.
//!
//! `config.toml` holds tunables; `secret.json` holds the default provider
//! credential. Every field has a default so partial files load.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Settings for the content generation provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deadline for one generation request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSettings {
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
}

impl SchedulerSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the platform data directory for the key-value store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `wisdom_application=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WisdomConfig {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Gemini credential entry in `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiSecret {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

impl SecretConfig {
    /// The configured default credential, ignoring blank placeholders.
    pub fn default_credential(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}
fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    45
}
fn default_temperature() -> f32 {
    0.7
}
fn default_top_k() -> u32 {
    40
}
fn default_tick_interval_secs() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: WisdomConfig = toml::from_str("").unwrap();
        assert_eq!(config, WisdomConfig::default());
        assert_eq!(config.provider.timeout(), Duration::from_secs(45));
        assert_eq!(config.scheduler.tick_interval(), Duration::from_secs(60));
        assert_eq!(config.provider.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_section() {
        let config: WisdomConfig = toml::from_str(
            r#"
            [provider]
            timeout_secs = 10

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.provider.top_k, 40);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_zero_tick_interval_is_clamped() {
        let settings = SchedulerSettings {
            tick_interval_secs: 0,
        };
        assert_eq!(settings.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_blank_secret_is_no_credential() {
        let secret: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"apiKey": "  "}}"#).unwrap();
        assert_eq!(secret.default_credential(), None);

        let secret: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"apiKey": "abc"}}"#).unwrap();
        assert_eq!(secret.default_credential(), Some("abc"));
        assert_eq!(SecretConfig::default().default_credential(), None);
    }
}
