//! # Storage Layer
//!
//! Persistence for logbook documents and settings.
//!
//! ## Storage Layout
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Main document | Raw markdown text | `<data dir>/todo-content` |
//! | Named pages | JSON object (id to text) | `<data dir>/todo-pages` |
//! | Config | TOML | `<data dir>/config.toml` |
//! | Editor log | Plain text | `<data dir>/logbook.log` |
//!
//! ## Concurrency Safety
//!
//! - [`FileStore`] reads under a shared lock (`fs2`)
//! - Writes go to a temp file under an exclusive lock, then are renamed into place
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point for a data directory
//! - [`PageStore`] - Main document plus named pages, one active at a time
//! - [`KeyValueStore`] - The persistence seam, with [`MemoryStore`] and [`FileStore`]
//! - [`Config`] - User configuration

mod config;
mod kv;
mod pages;
mod workspace;

pub use config::{Config, ConfigError, EditorConfig, OutputFormat, CONFIG_FILE};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use pages::{PageError, PageStore, DEFAULT_DOCUMENT, MAIN_KEY, PAGES_KEY};
pub use workspace::{Workspace, WorkspaceError, LOG_FILE};
