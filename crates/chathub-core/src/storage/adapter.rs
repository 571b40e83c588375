//! Storage adapter: load/save of the full conversation list.

use chathub_types::conversation::Conversation;
use chathub_types::error::StorageError;
use tracing::{debug, warn};

use super::backend::StorageBackend;

/// Logical key holding the serialized conversation list.
pub const CONVERSATIONS_KEY: &str = "chatConversations";

/// Serializes the ordered conversation list as JSON under a single key.
///
/// Generic over `StorageBackend` so the medium can be swapped without the
/// store knowing about it.
pub struct StorageAdapter<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> StorageAdapter<B> {
    /// Create an adapter storing under [`CONVERSATIONS_KEY`].
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, CONVERSATIONS_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the stored conversation list.
    ///
    /// Never fails: a missing value, an unreadable backend, or malformed
    /// content all yield an empty list.
    pub fn load(&self) -> Vec<Conversation> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored conversations");
                return Vec::new();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read conversations, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Conversation>>(&raw) {
            Ok(conversations) => {
                debug!(key = %self.key, count = conversations.len(), "loaded conversations");
                conversations
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored conversations are malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list with `conversations`.
    pub fn save(&self, conversations: &[Conversation]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(conversations)?;
        self.backend.set_item(&self.key, &raw)
    }
}
