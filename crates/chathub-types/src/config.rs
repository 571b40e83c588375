//! Configuration types for ChatHub.
//!
//! `ChatHubConfig` represents the optional `config.toml` in the data
//! directory. Every field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::conversation::DEFAULT_PREVIEW_LENGTH;

/// Bot handles offered when no catalog is configured.
pub const DEFAULT_BOTS: &[&str] = &[
    "GPT-4o",
    "Claude-3.5-Sonnet",
    "Gemini-1.5-Pro",
    "Llama-3.1-405B",
    "Mistral-Large-2",
];

/// Backing medium for the conversation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Per-process map; nothing survives a restart.
    #[default]
    Memory,
    /// JSON file in the data directory.
    File,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::File => write!(f, "file"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "file" => Ok(StorageKind::File),
            other => Err(format!("invalid storage kind: '{other}'")),
        }
    }
}

/// Top-level ChatHub configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHubConfig {
    /// Delay before the simulated reply when no bridge is available.
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,

    /// Number of characters kept in a conversation preview.
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// Recognized bot handles.
    #[serde(default = "default_bots")]
    pub bots: Vec<String>,

    #[serde(default)]
    pub storage: StorageKind,

    /// Capacity of the change-event broadcast channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_fallback_delay_ms() -> u64 {
    2000
}

fn default_preview_length() -> usize {
    DEFAULT_PREVIEW_LENGTH
}

fn default_bots() -> Vec<String> {
    DEFAULT_BOTS.iter().map(|b| b.to_string()).collect()
}

fn default_event_capacity() -> usize {
    256
}

impl ChatHubConfig {
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

impl Default for ChatHubConfig {
    fn default() -> Self {
        Self {
            fallback_delay_ms: default_fallback_delay_ms(),
            preview_length: default_preview_length(),
            bots: default_bots(),
            storage: StorageKind::default(),
            event_capacity: default_event_capacity(),
        }
    }
}
