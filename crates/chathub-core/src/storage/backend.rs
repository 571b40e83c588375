//! Key/value storage backend trait.

use std::sync::Arc;

use chathub_types::error::StorageError;

/// Synchronous string key/value medium.
///
/// Writes overwrite the whole value; there is no partial-write semantics.
/// Implementations live in chathub-infra (in-memory map, JSON file).
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}
