//! In-memory conversation store.
//!
//! `ConversationStore` owns the ordered conversation list and the current
//! selection. Every mutation is synchronous, persists the whole list through
//! the storage adapter, and publishes a `ChatEvent`.

use std::collections::HashSet;

use chathub_types::conversation::{Conversation, ConversationId, Message};
use chathub_types::error::{ChatError, ValidationError};
use chathub_types::event::ChatEvent;
use tracing::{debug, info, warn};

use crate::event::EventBus;
use crate::storage::{StorageAdapter, StorageBackend};

use super::catalog::BotCatalog;

/// Single source of truth for conversations and their messages.
///
/// The list is ordered most-recently-created first. Activity never reorders
/// it. Generic over `StorageBackend` so the backing medium is swappable.
pub struct ConversationStore<B: StorageBackend> {
    conversations: Vec<Conversation>,
    current: Option<ConversationId>,
    storage: StorageAdapter<B>,
    catalog: BotCatalog,
    events: EventBus,
    preview_length: usize,
}

impl<B: StorageBackend> ConversationStore<B> {
    /// Construct the store from whatever the storage adapter holds.
    ///
    /// Nothing is selected initially. Conversations whose id repeats an
    /// earlier entry are dropped so ids stay unique.
    pub fn open(
        storage: StorageAdapter<B>,
        catalog: BotCatalog,
        events: EventBus,
        preview_length: usize,
    ) -> Self {
        let conversations = dedupe_ids(storage.load());
        info!(count = conversations.len(), "conversation store opened");
        Self {
            conversations,
            current: None,
            storage,
            catalog,
            events,
            preview_length,
        }
    }

    /// Create a conversation and insert it at the head of the list.
    ///
    /// The name is trimmed; an empty name or an absent/unrecognized bot is
    /// a validation error and leaves the store untouched.
    pub fn create_conversation(
        &mut self,
        name: &str,
        bot: Option<&str>,
    ) -> Result<Conversation, ChatError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let bot = self.catalog.resolve(bot)?;

        let mut conversation = Conversation::new(name, bot);
        while self.contains(conversation.id) {
            conversation.id = ConversationId::new();
        }

        self.conversations.insert(0, conversation.clone());
        self.persist();
        info!(conversation_id = %conversation.id, bot = %conversation.bot, "conversation created");
        self.events.publish(ChatEvent::ConversationCreated {
            conversation_id: conversation.id,
        });
        Ok(conversation)
    }

    /// Make `id` the current conversation.
    ///
    /// Returns `None` and leaves the selection unchanged when `id` does not
    /// resolve to a held conversation.
    pub fn select_conversation(&mut self, id: ConversationId) -> Option<&Conversation> {
        let index = self.index_of(id)?;
        if self.current != Some(id) {
            self.current = Some(id);
            self.events.publish(ChatEvent::SelectionChanged { current: Some(id) });
        }
        self.conversations.get(index)
    }

    /// Append a finished message and refresh the conversation preview.
    ///
    /// Returns `NotFound` without mutating anything when the conversation has
    /// been deleted; callers on the reply path treat that as a no-op.
    pub fn append_message(&mut self, id: ConversationId, message: Message) -> Result<(), ChatError> {
        let preview_length = self.preview_length;
        let conversation = self.get_mut(id).ok_or(ChatError::NotFound(id))?;
        let message_id = message.id;
        conversation.push_message(message, preview_length);
        let last_message = conversation.last_message.clone();

        self.persist();
        debug!(conversation_id = %id, message_id = %message_id, "message appended");
        self.events.publish(ChatEvent::MessageAppended {
            conversation_id: id,
            message_id,
        });
        self.events.publish(ChatEvent::ConversationUpdated {
            conversation_id: id,
            last_message,
        });
        Ok(())
    }

    /// Empty a conversation's transcript and reset its preview.
    pub fn clear_messages(&mut self, id: ConversationId) -> Result<(), ChatError> {
        let conversation = self.get_mut(id).ok_or(ChatError::NotFound(id))?;
        conversation.clear_messages();
        let last_message = conversation.last_message.clone();

        self.persist();
        info!(conversation_id = %id, "conversation cleared");
        self.events.publish(ChatEvent::MessagesCleared { conversation_id: id });
        self.events.publish(ChatEvent::ConversationUpdated {
            conversation_id: id,
            last_message,
        });
        Ok(())
    }

    /// Remove a conversation.
    ///
    /// If it was current, the selection moves to the new head of the list,
    /// or to nothing when the list is now empty.
    pub fn delete_conversation(&mut self, id: ConversationId) -> Result<Conversation, ChatError> {
        let index = self.index_of(id).ok_or(ChatError::NotFound(id))?;
        let removed = self.conversations.remove(index);

        self.persist();
        info!(conversation_id = %id, "conversation deleted");
        self.events.publish(ChatEvent::ConversationDeleted { conversation_id: id });

        if self.current == Some(id) {
            self.current = self.conversations.first().map(|c| c.id);
            self.events.publish(ChatEvent::SelectionChanged {
                current: self.current,
            });
        }
        Ok(removed)
    }

    /// Read-only view of the list, most recently created first.
    pub fn list(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn messages(&self, id: ConversationId) -> Option<&[Message]> {
        self.get(id).map(|c| c.messages.as_slice())
    }

    pub fn current_id(&self) -> Option<ConversationId> {
        self.current
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn contains(&self, id: ConversationId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn catalog(&self) -> &BotCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn index_of(&self, id: ConversationId) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    fn get_mut(&mut self, id: ConversationId) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// Best-effort save. Failures are logged, never surfaced.
    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.conversations) {
            warn!(error = %err, "failed to persist conversations");
        }
    }
}

fn dedupe_ids(conversations: Vec<Conversation>) -> Vec<Conversation> {
    let mut seen = HashSet::with_capacity(conversations.len());
    conversations
        .into_iter()
        .filter(|conv| {
            let first = seen.insert(conv.id);
            if !first {
                warn!(conversation_id = %conv.id, name = %conv.name, "dropping stored conversation with duplicate id");
            }
            first
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingBackend, MapBackend};
    use chathub_types::conversation::{BotId, NEW_CONVERSATION_PREVIEW};
    use std::sync::Arc;

    fn open_store() -> ConversationStore<Arc<MapBackend>> {
        open_store_on(Arc::new(MapBackend::default()))
    }

    fn open_store_on(backend: Arc<MapBackend>) -> ConversationStore<Arc<MapBackend>> {
        ConversationStore::open(
            StorageAdapter::new(backend),
            BotCatalog::default(),
            EventBus::new(64),
            50,
        )
    }

    #[test]
    fn test_create_places_conversation_at_head() {
        let mut store = open_store();
        let first = store.create_conversation("Premier", Some("GPT-4o")).unwrap();
        let second = store
            .create_conversation("Second", Some("Claude-3.5-Sonnet"))
            .unwrap();

        let ids: Vec<ConversationId> = store.list().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(second.last_message, NEW_CONVERSATION_PREVIEW);
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut store = open_store();
        let mut seen = HashSet::new();
        for i in 0..50 {
            let conv = store
                .create_conversation(&format!("conv {i}"), Some("GPT-4o"))
                .unwrap();
            assert!(seen.insert(conv.id));
        }
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn test_create_trims_name() {
        let mut store = open_store();
        let conv = store.create_conversation("  Recettes  ", Some("GPT-4o")).unwrap();
        assert_eq!(conv.name, "Recettes");
    }

    #[test]
    fn test_create_rejects_empty_name_without_mutation() {
        let mut store = open_store();
        for name in ["", "   ", "\n\t"] {
            let err = store.create_conversation(name, Some("GPT-4o")).unwrap_err();
            assert!(matches!(err, ChatError::Validation(ValidationError::EmptyName)));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_missing_or_unknown_bot() {
        let mut store = open_store();
        let err = store.create_conversation("Valide", None).unwrap_err();
        assert!(matches!(err, ChatError::Validation(ValidationError::MissingBot)));

        let err = store.create_conversation("Valide", Some("HAL-9000")).unwrap_err();
        assert!(matches!(err, ChatError::Validation(ValidationError::UnknownBot(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_does_not_select() {
        let mut store = open_store();
        store.create_conversation("Notes", Some("GPT-4o")).unwrap();
        assert!(store.current_id().is_none());
    }

    #[test]
    fn test_select_existing_and_missing() {
        let mut store = open_store();
        let conv = store.create_conversation("Notes", Some("GPT-4o")).unwrap();

        assert_eq!(store.select_conversation(conv.id).map(|c| c.id), Some(conv.id));
        assert_eq!(store.current_id(), Some(conv.id));

        assert!(store.select_conversation(ConversationId::new()).is_none());
        assert_eq!(store.current_id(), Some(conv.id));
    }

    #[test]
    fn test_append_grows_in_call_order_and_updates_preview() {
        let mut store = open_store();
        let conv = store.create_conversation("Notes", Some("GPT-4o")).unwrap();

        let long = "x".repeat(80);
        let contents = ["un", "deux", long.as_str()];
        for (i, content) in contents.iter().enumerate() {
            store.append_message(conv.id, Message::user(*content)).unwrap();
            let current = store.get(conv.id).unwrap();
            assert_eq!(current.messages.len(), i + 1);
            assert_eq!(current.messages[i].content, *content);
        }

        let current = store.get(conv.id).unwrap();
        assert_eq!(current.last_message, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_append_to_missing_conversation_is_not_found() {
        let mut store = open_store();
        let conv = store.create_conversation("Notes", Some("GPT-4o")).unwrap();
        let before = store.list().to_vec();

        let missing = ConversationId::new();
        let err = store.append_message(missing, Message::user("perdu")).unwrap_err();
        assert!(matches!(err, ChatError::NotFound(id) if id == missing));
        assert_eq!(store.list(), before.as_slice());
        assert!(store.get(conv.id).unwrap().messages.is_empty());
    }

    #[test]
    fn test_clear_resets_messages_and_preview() {
        let mut store = open_store();
        let conv = store.create_conversation("Notes", Some("GPT-4o")).unwrap();
        store.append_message(conv.id, Message::user("a")).unwrap();
        store
            .append_message(conv.id, Message::bot(BotId::from("GPT-4o"), "b", None))
            .unwrap();

        store.clear_messages(conv.id).unwrap();
        let current = store.get(conv.id).unwrap();
        assert!(current.messages.is_empty());
        assert_eq!(current.last_message, NEW_CONVERSATION_PREVIEW);
    }

    #[test]
    fn test_delete_only_conversation_clears_selection() {
        let mut store = open_store();
        let conv = store.create_conversation("Seule", Some("GPT-4o")).unwrap();
        store.select_conversation(conv.id);

        store.delete_conversation(conv.id).unwrap();
        assert!(store.is_empty());
        assert!(store.current_id().is_none());
    }

    #[test]
    fn test_delete_current_moves_selection_to_new_head() {
        let mut store = open_store();
        let older = store.create_conversation("Ancienne", Some("GPT-4o")).unwrap();
        let middle = store.create_conversation("Milieu", Some("GPT-4o")).unwrap();
        let newest = store.create_conversation("Récente", Some("GPT-4o")).unwrap();

        store.select_conversation(middle.id);
        store.delete_conversation(middle.id).unwrap();
        assert_eq!(store.current_id(), Some(newest.id));

        store.delete_conversation(newest.id).unwrap();
        assert_eq!(store.current_id(), Some(older.id));
    }

    #[test]
    fn test_delete_non_current_keeps_selection() {
        let mut store = open_store();
        let keep = store.create_conversation("Garder", Some("GPT-4o")).unwrap();
        let drop = store.create_conversation("Jeter", Some("GPT-4o")).unwrap();
        store.select_conversation(keep.id);

        store.delete_conversation(drop.id).unwrap();
        assert_eq!(store.current_id(), Some(keep.id));
        assert!(store.delete_conversation(drop.id).is_err());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let backend = Arc::new(MapBackend::default());
        let mut store = open_store_on(backend.clone());
        let conv = store.create_conversation("Durable", Some("GPT-4o")).unwrap();
        store.append_message(conv.id, Message::user("bonjour")).unwrap();

        let reopened = open_store_on(backend);
        assert_eq!(reopened.list(), store.list());
        assert_eq!(reopened.messages(conv.id).map(<[Message]>::len), Some(1));
    }

    #[test]
    fn test_open_drops_duplicate_stored_ids() {
        let backend = Arc::new(MapBackend::default());
        let original = Conversation::new("Originale", BotId::from("GPT-4o"));
        let mut copy = Conversation::new("Copie", BotId::from("Claude-3.5-Sonnet"));
        copy.id = original.id;
        let other = Conversation::new("Autre", BotId::from("GPT-4o"));
        StorageAdapter::new(backend.clone())
            .save(&[original.clone(), copy, other.clone()])
            .unwrap();

        let mut store = open_store_on(backend);
        let names: Vec<&str> = store.list().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Originale", "Autre"]);

        store.select_conversation(original.id);
        store.delete_conversation(original.id).unwrap();
        assert!(!store.contains(original.id));
        assert_eq!(store.current_id(), Some(other.id));
    }

    #[test]
    fn test_failing_storage_does_not_break_mutations() {
        let mut store = ConversationStore::open(
            StorageAdapter::new(FailingBackend),
            BotCatalog::default(),
            EventBus::new(8),
            50,
        );
        let conv = store.create_conversation("Volatile", Some("GPT-4o")).unwrap();
        store.append_message(conv.id, Message::user("toujours là")).unwrap();
        assert_eq!(store.get(conv.id).unwrap().messages.len(), 1);
    }

    #[test]
    fn test_mutations_publish_events() {
        let events = EventBus::new(64);
        let mut rx = events.subscribe();
        let mut store = ConversationStore::open(
            StorageAdapter::new(MapBackend::default()),
            BotCatalog::default(),
            events,
            50,
        );

        let conv = store.create_conversation("Notes", Some("GPT-4o")).unwrap();
        store.select_conversation(conv.id);
        store.append_message(conv.id, Message::user("salut")).unwrap();
        store.delete_conversation(conv.id).unwrap();

        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        assert!(matches!(received[0], ChatEvent::ConversationCreated { .. }));
        assert_eq!(
            received[1],
            ChatEvent::SelectionChanged {
                current: Some(conv.id)
            }
        );
        assert!(matches!(received[2], ChatEvent::MessageAppended { .. }));
        assert_eq!(
            received[3],
            ChatEvent::ConversationUpdated {
                conversation_id: conv.id,
                last_message: "salut".to_string()
            }
        );
        assert_eq!(
            received[4],
            ChatEvent::ConversationDeleted {
                conversation_id: conv.id
            }
        );
        assert_eq!(received[5], ChatEvent::SelectionChanged { current: None });
    }
}
