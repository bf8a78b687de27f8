//! Key-value storage backends
//!
//! The core persists through a string-keyed, string-valued store. Two
//! backends are provided:
//! - [`MemoryStore`] keeps everything in a map (tests, embedding).
//! - [`FileStore`] keeps one file per key in a directory. Reads take a shared
//!   lock, writes go to a temp file under an exclusive lock and are renamed
//!   into place.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidKey(String),

    #[error("Failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// String-keyed, string-valued persistence
pub trait KeyValueStore {
    /// Reads a value; `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store, one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path for a key
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let read_err = |source| StorageError::Read {
            key: key.to_string(),
            source,
        };

        let mut file = File::open(&path).map_err(read_err)?;

        // Lock is released when file is dropped
        file.lock_shared().map_err(read_err)?;

        let mut content = String::new();
        file.read_to_string(&mut content).map_err(read_err)?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let temp_path = self.dir.join(format!(".{}.tmp", key));
        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            file.lock_exclusive().map_err(write_err)?;

            let mut writer = BufWriter::new(&file);
            writer.write_all(value.as_bytes()).map_err(write_err)?;
            writer.flush().map_err(write_err)?;
        }

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(write_err)
    }
}
