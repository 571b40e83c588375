//! Infrastructure layer for ChatHub.
//!
//! Contains implementations of the ports defined in `chathub-core`: the
//! in-memory and JSON-file storage backends, the loopback development bridge,
//! plus config loading and data directory resolution.

pub mod bridge;
pub mod config;
pub mod paths;
pub mod storage;
