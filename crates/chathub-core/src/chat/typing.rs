//! Per-conversation registry of in-flight bot replies.
//!
//! At most one reply is tracked per conversation. A newer dispatch replaces
//! the record; stale dispatches can no longer update or finish it because
//! every mutation is checked against the request id handed out by `begin`.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use chathub_types::conversation::{BotId, ConversationId};

/// The typing indicator state of one conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingState {
    pub request_id: Uuid,
    pub bot: BotId,
    /// Cumulative partial reply, if any has been streamed yet.
    pub partial: Option<String>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct InFlightRegistry {
    entries: DashMap<ConversationId, TypingState>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a reply for `conversation_id`, replacing any older one.
    pub fn begin(&self, conversation_id: ConversationId, bot: BotId) -> Uuid {
        let request_id = Uuid::now_v7();
        self.entries.insert(
            conversation_id,
            TypingState {
                request_id,
                bot,
                partial: None,
                started_at: Utc::now(),
            },
        );
        request_id
    }

    /// Record partial text. Returns false if `request_id` is no longer current.
    pub fn update(&self, conversation_id: ConversationId, request_id: Uuid, content: &str) -> bool {
        match self.entries.get_mut(&conversation_id) {
            Some(mut state) if state.request_id == request_id => {
                state.partial = Some(content.to_string());
                true
            }
            _ => false,
        }
    }

    /// Stop tracking. Returns false if `request_id` is no longer current.
    pub fn finish(&self, conversation_id: ConversationId, request_id: Uuid) -> bool {
        self.entries
            .remove_if(&conversation_id, |_, state| state.request_id == request_id)
            .is_some()
    }

    pub fn get(&self, conversation_id: ConversationId) -> Option<TypingState> {
        self.entries.get(&conversation_id).map(|s| s.clone())
    }

    pub fn is_typing(&self, conversation_id: ConversationId) -> bool {
        self.entries.contains_key(&conversation_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
