//! Test doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;

use chathub_types::error::StorageError;

use crate::storage::StorageBackend;

/// Plain in-process backend.
#[derive(Default)]
pub struct MapBackend {
    values: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MapBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().expect("map backend lock poisoned").get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .expect("map backend lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend whose every call fails.
pub struct FailingBackend;

impl StorageBackend for FailingBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}
