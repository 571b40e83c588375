//! Per-session in-memory storage backend.
//!
//! The default medium: values live as long as the process does.

use dashmap::DashMap;

use chathub_core::storage::StorageBackend;
use chathub_types::error::StorageError;

/// Concurrent key/value map implementing `StorageBackend`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chathub_core::storage::StorageAdapter;
    use chathub_types::conversation::{BotId, Conversation, DEFAULT_PREVIEW_LENGTH, Message};

    #[test]
    fn test_get_missing_key() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get_item("absent").unwrap(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_set_overwrites_whole_value() {
        let backend = MemoryBackend::new();
        backend.set_item("k", "un").unwrap();
        backend.set_item("k", "deux").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("deux"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_adapter_roundtrip_through_memory() {
        let adapter = StorageAdapter::new(MemoryBackend::new());
        let mut conv = Conversation::new("Mémoire", BotId::from("GPT-4o"));
        conv.push_message(Message::user("bonjour"), DEFAULT_PREVIEW_LENGTH);

        adapter.save(std::slice::from_ref(&conv)).unwrap();
        assert_eq!(adapter.load(), vec![conv]);
    }
}
