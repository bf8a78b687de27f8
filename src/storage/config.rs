//! Configuration handling for logbook
//!
//! Configuration is stored in `config.toml` inside the data directory. Every
//! field has a default, so a missing file or a partial one is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Terminal editor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// Open the editor in preview mode instead of edit mode
    pub start_in_preview: bool,

    /// Input poll interval in milliseconds
    pub tick_rate_ms: u64,

    /// Seconds between automatic saves (0 disables autosave)
    pub autosave_seconds: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            start_in_preview: false,
            tick_rate_ms: 250,
            autosave_seconds: 5,
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Terminal editor settings
    pub editor: EditorConfig,
}

impl Config {
    /// Returns the platform data directory used when none is given
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "logbook", "logbook").map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Loads configuration from a data directory, falling back to defaults
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "editor.tick_rate_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
