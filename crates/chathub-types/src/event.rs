//! Change notifications emitted by the conversation store and chat service.
//!
//! `ChatEvent` is the observer contract for the presentation layer: instead of
//! the core calling render functions, every mutation publishes one of these
//! on the event bus. All variants are Clone + Send + Sync for use with tokio
//! broadcast channels.

use serde::{Deserialize, Serialize};

use crate::conversation::{BotId, ConversationId, MessageId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A conversation was created and inserted at the head of the list.
    ConversationCreated { conversation_id: ConversationId },

    /// A conversation's preview changed.
    ConversationUpdated {
        conversation_id: ConversationId,
        last_message: String,
    },

    /// A conversation was removed from the list.
    ConversationDeleted { conversation_id: ConversationId },

    /// The current selection changed (`None` means nothing is selected).
    SelectionChanged { current: Option<ConversationId> },

    /// A finished message was appended to a conversation.
    MessageAppended {
        conversation_id: ConversationId,
        message_id: MessageId,
    },

    /// Every message of a conversation was removed.
    MessagesCleared { conversation_id: ConversationId },

    /// A bot reply is in flight; the typing indicator should be shown.
    TypingStarted {
        conversation_id: ConversationId,
        bot: BotId,
    },

    /// Partial reply text for the typing indicator (cumulative, not a delta).
    TypingUpdated {
        conversation_id: ConversationId,
        content: String,
    },

    /// The in-flight reply reached a terminal state; hide the indicator.
    TypingStopped { conversation_id: ConversationId },
}

impl ChatEvent {
    /// The conversation this event concerns, if it concerns exactly one.
    pub fn conversation_id(&self) -> Option<ConversationId> {
        match self {
            ChatEvent::ConversationCreated { conversation_id }
            | ChatEvent::ConversationUpdated { conversation_id, .. }
            | ChatEvent::ConversationDeleted { conversation_id }
            | ChatEvent::MessageAppended { conversation_id, .. }
            | ChatEvent::MessagesCleared { conversation_id }
            | ChatEvent::TypingStarted { conversation_id, .. }
            | ChatEvent::TypingUpdated { conversation_id, .. }
            | ChatEvent::TypingStopped { conversation_id } => Some(*conversation_id),
            ChatEvent::SelectionChanged { current } => *current,
        }
    }
}
