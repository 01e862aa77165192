//! Configuration management commands.
//!
//! Stores CLI settings in `~/.ideabox/config.toml`. Known keys are
//! `api-url` and `token`.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use ideabox_core::telemetry::SensitiveFieldRedactor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::output::{self, OutputFormat};

pub const API_URL_KEY: &str = "api-url";
pub const TOKEN_KEY: &str = "token";

const KNOWN_KEYS: &[&str] = &[API_URL_KEY, TOKEN_KEY];

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key (api-url or token)
        key: String,
        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Remove a configuration value
    Unset {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Persistent CLI settings stored on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl CliConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Values as they may be printed; secrets are masked.
    pub fn display_values(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), display_value(k, v)))
            .collect()
    }
}

fn display_value(key: &str, value: &str) -> String {
    SensitiveFieldRedactor::global().redact(key, value)
}

fn check_key(key: &str) -> Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        bail!("Unknown key '{}' (expected one of: {})", key, KNOWN_KEYS.join(", "));
    }
    Ok(())
}

/// Return the path to the configuration file (`~/.ideabox/config.toml`).
fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".ideabox").join("config.toml"))
}

/// Load settings from `path`, returning defaults if the file does not exist.
fn load_from(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Save settings to `path`, creating the directory if needed.
fn save_to(path: &Path, cfg: &CliConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(cfg).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load the CLI settings from the default location.
pub fn load_config() -> Result<CliConfig> {
    load_from(&config_path()?)
}

pub async fn execute(cmd: ConfigCommands, format: OutputFormat) -> Result<()> {
    let path = config_path()?;

    match cmd {
        ConfigCommands::Set { key, value } => {
            check_key(&key)?;
            let mut cfg = load_from(&path)?;
            cfg.values.insert(key.clone(), value.trim().to_string());
            save_to(&path, &cfg)?;

            let shown = display_value(&key, &value);
            match format {
                OutputFormat::Table => output::print_success(&format!("{} = {}", key, shown)),
                _ => output::print_item(&serde_json::json!({ "key": key, "value": shown }), format)?,
            }
        }

        ConfigCommands::Get { key } => {
            check_key(&key)?;
            let cfg = load_from(&path)?;
            let Some(value) = cfg.get(&key) else {
                bail!("Key '{}' is not set", key);
            };

            let shown = display_value(&key, value);
            match format {
                OutputFormat::Table => println!("{}", shown),
                _ => output::print_item(&serde_json::json!({ "key": key, "value": shown }), format)?,
            }
        }

        ConfigCommands::Unset { key } => {
            check_key(&key)?;
            let mut cfg = load_from(&path)?;
            if cfg.values.remove(&key).is_none() {
                output::print_info(&format!("Key '{}' was not set", key));
                return Ok(());
            }
            save_to(&path, &cfg)?;
            output::print_success(&format!("Removed {}", key));
        }

        ConfigCommands::Show => {
            let cfg = load_from(&path)?;

            if cfg.values.is_empty() {
                output::print_info("No configuration values set.");
                return Ok(());
            }

            match format {
                OutputFormat::Table => {
                    output::print_header(&format!("Configuration ({})", path.display()));
                    for (k, v) in cfg.display_values() {
                        output::print_detail(&k, &v);
                    }
                }
                _ => output::print_item(&cfg.display_values(), format)?,
            }
        }

        ConfigCommands::Reset { force } => {
            if !force {
                output::print_info(
                    "This will reset all CLI configuration. Use --force to confirm.",
                );
                return Ok(());
            }

            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }

            output::print_success("Configuration reset to defaults");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.values.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = CliConfig::default();
        cfg.values.insert(API_URL_KEY.to_string(), "https://ideas.example.com/api".to_string());
        save_to(&path, &cfg).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.get(API_URL_KEY), Some("https://ideas.example.com/api"));
        assert_eq!(loaded.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_blank_value_reads_as_unset() {
        let mut cfg = CliConfig::default();
        cfg.values.insert(TOKEN_KEY.to_string(), "  ".to_string());
        assert_eq!(cfg.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_token_is_masked_for_display() {
        let mut cfg = CliConfig::default();
        cfg.values.insert(TOKEN_KEY.to_string(), "12|abcdefghijklmnopqrstuvwxyzabcdefghijklmnop".to_string());
        cfg.values.insert(API_URL_KEY.to_string(), "http://localhost:8000/api".to_string());

        let shown = cfg.display_values();
        assert_eq!(shown[TOKEN_KEY], "[REDACTED]");
        assert_eq!(shown[API_URL_KEY], "http://localhost:8000/api");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(check_key("api-url").is_ok());
        assert!(check_key("colour").is_err());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "values = 3").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
