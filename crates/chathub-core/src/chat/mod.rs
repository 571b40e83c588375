//! Conversation state and bot reply orchestration for ChatHub.
//!
//! `ConversationStore` is the single owner of conversations and messages;
//! `ChatService` is the entry point the presentation layer talks to.

pub mod catalog;
pub mod service;
pub mod store;
pub mod typing;

pub use catalog::BotCatalog;
pub use service::{ChatService, DispatchHandle, DispatchOutcome};
pub use store::ConversationStore;
pub use typing::{InFlightRegistry, TypingState};
