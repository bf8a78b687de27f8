//! Data directory management
//!
//! A workspace is the directory holding the documents, the configuration and
//! the editor log. It is picked from the `--dir` flag, the `LOGBOOK_DIR`
//! environment variable or the platform data directory, in that order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::{Config, CONFIG_FILE};
use super::kv::FileStore;
use super::pages::PageStore;

/// Name of the terminal editor's log file
pub const LOG_FILE: &str = "logbook.log";

const DEFAULT_CONFIG: &str = r#"# logbook configuration

# Output format for commands: "text" or "json"
default_format = "text"

[editor]
# Open the terminal editor in preview mode
start_in_preview = false

# Input poll interval in milliseconds
tick_rate_ms = 250

# Seconds between automatic saves (0 disables autosave)
autosave_seconds = 5
"#;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Could not determine a data directory. Pass --dir or set LOGBOOK_DIR.")]
    NoDataDir,

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A logbook data directory
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Picks the data directory: explicit path first, then the platform default
    pub fn resolve(dir: Option<PathBuf>) -> Result<PathBuf> {
        match dir {
            Some(dir) => Ok(dir),
            None => Config::default_data_dir().ok_or_else(|| WorkspaceError::NoDataDir.into()),
        }
    }

    /// Opens a workspace; the directory does not need to exist yet
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.exists() && !root.is_dir() {
            return Err(WorkspaceError::NotADirectory(root).into());
        }

        let config = Config::load(&root)?;
        Ok(Self { root, config })
    }

    /// Creates the directory and a commented default config
    ///
    /// Existing files are left alone, so running it twice is harmless.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory: {}", root.display()))?;

        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        Self::open(root)
    }

    /// Returns the data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the key-value store backed by this directory
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.root)
    }

    /// Opens the page store with the main page active
    pub fn page_store(&self) -> Result<PageStore<FileStore>> {
        PageStore::open(self.store())
            .with_context(|| format!("Failed to load documents from {}", self.root.display()))
    }

    /// Returns the editor log path
    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }
}
