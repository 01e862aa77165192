//! Configuration management.
//!
//! Values come from an optional file, then `IDEABOX__`-prefixed environment
//! variables (`IDEABOX__API__BASE_URL`, `IDEABOX__LISTING__SEARCH_DEBOUNCE`).
//! A `.env` file in the working directory is read first when present.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{IdeaBoxError, Result};
use crate::telemetry::LoggingConfig;
use crate::validation::{validate_field, validate_request, Required, Url};

const ENV_PREFIX: &str = "IDEABOX";

/// Main client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// REST API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Idea list behaviour
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every API path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Bearer token, when one was issued outside the client
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Quiet period before a search keystroke is sent
    #[serde(default = "default_search_debounce", with = "humantime_serde")]
    pub search_debounce: Duration,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            search_debounce: default_search_debounce(),
        }
    }
}

// Default value functions
fn default_base_url() -> String { "http://localhost:8000/api".to_string() }
fn default_timeout() -> Duration { Duration::from_secs(30) }
fn default_search_debounce() -> Duration { Duration::from_millis(300) }

impl Config {
    /// Load configuration from `.env` and the environment.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Load from a specific file path, with the environment layered on top.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        validate_request()
            .field(
                validate_field("api.base_url", &self.api.base_url)
                    .stop_on_first()
                    .rule(Required)
                    .rule(Url),
            )
            .result()
            .map_err(|errors| {
                IdeaBoxError::from(errors).with_internal_message("invalid client configuration")
            })?;

        if self.api.timeout.is_zero() {
            return Err(IdeaBoxError::configuration("api.timeout must be greater than zero"));
        }

        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.listing.search_debounce, Duration::from_millis(300));
        assert!(config.api.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://ideas.example.com/api"
timeout = "5s"

[listing]
search_debounce = "150ms"

[logging]
level = "debug"
format = "compact"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://ideas.example.com/api");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
        assert_eq!(config.listing.search_debounce, Duration::from_millis(150));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        let error = config.validate().unwrap_err();
        assert_eq!(error.code(), crate::error::ErrorCode::ValidationError);
        assert!(error.details().fields.contains_key("api.base_url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
