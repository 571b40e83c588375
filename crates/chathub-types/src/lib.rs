//! Shared domain types for ChatHub.
//!
//! This crate contains the domain types used across the ChatHub workspace:
//! conversations, messages, attachments, bot bridge wire types, change events,
//! configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, uuid, chrono, thiserror.

pub mod bridge;
pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
