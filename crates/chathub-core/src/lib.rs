//! Business logic and port definitions for ChatHub.
//!
//! This crate defines the "ports" (storage backend and bot bridge traits) that
//! the infrastructure layer implements, plus the conversation store and the
//! chat service that drives bot dispatches. It depends only on
//! `chathub-types` -- never on `chathub-infra` or any IO crate.

pub mod bridge;
pub mod chat;
pub mod event;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
