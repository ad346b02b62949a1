//! Configuration loading, validation, and management for Thermowise.
//!
//! Loads configuration from `~/.thermowise/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.thermowise/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Local inference service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Thermostat dataset settings
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the Ollama service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Liveness probe timeout
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Wait between launching the service and re-probing it
    #[serde(default = "default_startup_grace")]
    pub startup_grace_secs: u64,

    /// Generation request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Executable that starts the service
    #[serde(default = "default_launch_command")]
    pub launch_command: String,

    #[serde(default = "default_launch_args")]
    pub launch_args: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "phi".into()
}
fn default_probe_timeout() -> u64 {
    5
}
fn default_startup_grace() -> u64 {
    5
}
fn default_request_timeout() -> u64 {
    30
}
fn default_launch_command() -> String {
    "ollama".into()
}
fn default_launch_args() -> Vec<String> {
    vec!["serve".into()]
}
fn default_true() -> bool {
    true
}

impl ServiceConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn startup_grace(&self) -> Duration {
        Duration::from_secs(self.startup_grace_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            probe_timeout_secs: default_probe_timeout(),
            startup_grace_secs: default_startup_grace(),
            request_timeout_secs: default_request_timeout(),
            launch_command: default_launch_command(),
            launch_args: default_launch_args(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV export of the thermostat
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    /// Load the dataset when a session starts
    #[serde(default = "default_true")]
    pub autoload: bool,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("enhanced_thermostat_data.csv")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            autoload: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.thermowise/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `THERMOWISE_OLLAMA_URL`
    /// - `THERMOWISE_MODEL`
    /// - `THERMOWISE_DATASET`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path())
    }

    /// Load `path` (missing file → defaults), then apply environment
    /// overrides and validate the result.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Default config file location.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("THERMOWISE_OLLAMA_URL") {
            self.service.base_url = url;
        }
        if let Ok(model) = std::env::var("THERMOWISE_MODEL") {
            self.service.model = model;
        }
        if let Ok(path) = std::env::var("THERMOWISE_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".thermowise")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let service = &self.service;

        if service.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.base_url must not be empty".into(),
            ));
        }

        if service.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.model must not be empty".into(),
            ));
        }

        if service.launch_command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.launch_command must not be empty".into(),
            ));
        }

        for (name, secs) in [
            ("probe_timeout_secs", service.probe_timeout_secs),
            ("startup_grace_secs", service.startup_grace_secs),
            ("request_timeout_secs", service.request_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "service.{name} must be greater than 0"
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
