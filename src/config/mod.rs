// src/config/mod.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SMART_ANALYZER";

/// Runtime settings: built-in defaults, then an optional `settings.{toml,ron,..}`
/// in the user config dir, then `SMART_ANALYZER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub email_recipient: String,
    pub chat_channel_recipient: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout_secs: 10,
            email_recipient: "user@example.com".to_string(),
            chat_channel_recipient: "#general".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let config_file = dirs::config_dir().map(|dir| dir.join("smart-analyzer").join("settings"));
        Self::layered(config_file, Some(Environment::with_prefix(ENV_PREFIX)))
    }

    pub fn layered(config_file: Option<PathBuf>, environment: Option<Environment>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("connect_timeout_secs", defaults.connect_timeout_secs)?
            .set_default("email_recipient", defaults.email_recipient)?
            .set_default("chat_channel_recipient", defaults.chat_channel_recipient)?
            .set_default("log_filter", defaults.log_filter)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(&path.to_string_lossy()).required(false));
        }
        if let Some(environment) = environment {
            builder = builder.add_source(environment);
        }

        builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::layered(None, None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.toml"),
            "base_url = \"https://analytics.example.org\"\nconnect_timeout_secs = 3\n",
        )
        .unwrap();

        let settings = Settings::layered(Some(dir.path().join("settings")), None).unwrap();
        assert_eq!(settings.base_url, "https://analytics.example.org");
        assert_eq!(settings.connect_timeout_secs, 3);
        assert_eq!(settings.email_recipient, "user@example.com");
    }

    #[test]
    fn test_ron_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.ron"),
            "(chat_channel_recipient: \"#sales\", log_filter: \"debug\")",
        )
        .unwrap();

        let settings = Settings::layered(Some(dir.path().join("settings")), None).unwrap();
        assert_eq!(settings.chat_channel_recipient, "#sales");
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.toml"), "email_recipient = \"file@example.com\"\n").unwrap();

        let mut vars = std::collections::HashMap::new();
        vars.insert("TEST_EMAIL_RECIPIENT".to_string(), "env@example.com".to_string());
        let environment = Environment::with_prefix("TEST").source(Some(vars));

        let settings = Settings::layered(Some(dir.path().join("settings")), Some(environment)).unwrap();
        assert_eq!(settings.email_recipient, "env@example.com");
    }

    #[test]
    fn test_missing_settings_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::layered(Some(dir.path().join("settings")), None).unwrap();
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.toml"), "connect_timeout_secs = \"soon\"\n").unwrap();
        assert!(Settings::layered(Some(dir.path().join("settings")), None).is_err());
    }
}
