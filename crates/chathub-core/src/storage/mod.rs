//! Conversation persistence for ChatHub.
//!
//! `StorageBackend` is the swappable key/value medium (implementations live in
//! chathub-infra); `StorageAdapter` serializes the whole conversation list
//! under a single key on top of it.

pub mod adapter;
pub mod backend;

pub use adapter::{StorageAdapter, CONVERSATIONS_KEY};
pub use backend::StorageBackend;
