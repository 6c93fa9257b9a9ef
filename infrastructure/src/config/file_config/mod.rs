//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api;
mod enrichment;
mod output;

pub use api::FileApiConfig;
pub use enrichment::{FileEnrichmentConfig, MAX_PAGE_LIMIT};
pub use output::FileOutputConfig;

use crate::duty::DutyClientConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors found while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("api.app_key is required (config file, DUTY_APP_KEY or --app-key)")]
    MissingAppKey,

    #[error("api.base_url '{0}' is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("api.timeout_seconds must be greater than 0")]
    InvalidTimeout,

    #[error("enrichment.{field} must be between 1 and {MAX_PAGE_LIMIT} (got {value})")]
    LimitOutOfRange { field: &'static str, value: usize },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// API connection settings
    pub api: FileApiConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Enrichment limits
    pub enrichment: FileEnrichmentConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.app_key().is_none() {
            return Err(ConfigError::MissingAppKey);
        }
        if Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(self.api.base_url.clone()));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        for (field, value) in [
            ("alerts_limit", self.enrichment.alerts_limit),
            ("timeline_limit", self.enrichment.timeline_limit),
        ] {
            if !(1..=MAX_PAGE_LIMIT).contains(&value) {
                return Err(ConfigError::LimitOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Validate and convert into client settings.
    pub fn client_config(&self) -> Result<DutyClientConfig, ConfigError> {
        self.validate()?;
        let app_key = self.api.app_key().ok_or(ConfigError::MissingAppKey)?;
        Ok(DutyClientConfig::new(app_key)
            .with_base_url(self.api.base_url.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_seconds))
            .with_user_agent(self.api.user_agent.clone())
            .with_timeline_limit(self.enrichment.timeline_limit))
    }

    /// Render the effective configuration as TOML with the APP key masked.
    pub fn to_redacted_toml(&self) -> String {
        let mut shown = self.clone();
        if shown.api.app_key().is_some() {
            shown.api.app_key = Some("[REDACTED]".to_string());
        }
        toml::to_string_pretty(&shown).unwrap_or_else(|e| format!("# failed to render config: {e}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duty_domain::OutputFormat;

    fn valid() -> FileConfig {
        let mut config = FileConfig::default();
        config.api.app_key = Some("k".to_string());
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
base_url = "https://duty.example.com"
app_key = "abc"
timeout_seconds = 10

[output]
format = "pretty"

[enrichment]
alerts_limit = 5
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://duty.example.com");
        assert_eq!(config.api.app_key(), Some("abc"));
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.output.format, Some(OutputFormat::Pretty));
        assert_eq!(config.enrichment.alerts_limit, 5);
        // Defaults should apply
        assert_eq!(config.enrichment.timeline_limit, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.api.base_url, "https://api.flashcat.cloud");
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(config.output.format.is_none());
        assert!(matches!(config.validate(), Err(ConfigError::MissingAppKey)));
    }

    #[test]
    fn test_blank_app_key_is_missing() {
        let mut config = valid();
        config.api.app_key = Some("   ".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::MissingAppKey)));
    }

    #[test]
    fn test_validate_timeout_and_limits() {
        let mut config = valid();
        config.api.timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));

        let mut config = valid();
        config.enrichment.alerts_limit = 101;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LimitOutOfRange { field: "alerts_limit", value: 101 })
        ));

        let mut config = valid();
        config.enrichment.timeline_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LimitOutOfRange { field: "timeline_limit", value: 0 })
        ));
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = valid();
        config.api.base_url = "api.flashcat.cloud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_client_config() {
        let mut config = valid();
        config.api.timeout_seconds = 5;
        config.enrichment.timeline_limit = 40;

        let client = config.client_config().unwrap();

        assert_eq!(client.app_key, "k");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.timeline_limit, 40);
    }

    #[test]
    fn test_redacted_toml_hides_key() {
        let mut config = valid();
        config.api.app_key = Some("very-secret".to_string());

        let rendered = config.to_redacted_toml();

        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
