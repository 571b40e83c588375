//! JSON-file storage backend.
//!
//! Each key is stored as `{dir}/{key}.json`. Writes go to a temporary file in
//! the same directory which is then renamed over the target, so a reader
//! never observes a half-written value.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use chathub_core::storage::StorageBackend;
use chathub_types::error::StorageError;

/// File-per-key implementation of `StorageBackend`.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(StorageError::Unavailable(format!("invalid storage key: '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for JsonFileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored value");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| StorageError::from(err.error))?;

        debug!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}
