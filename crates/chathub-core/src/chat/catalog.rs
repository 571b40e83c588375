//! The fixed set of bot personas a conversation can be bound to.

use chathub_types::config::DEFAULT_BOTS;
use chathub_types::conversation::BotId;
use chathub_types::error::ValidationError;

/// Ordered set of recognized bot handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCatalog {
    bots: Vec<BotId>,
}

impl BotCatalog {
    /// Build a catalog, dropping blank and duplicate handles.
    pub fn new<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bots: Vec<BotId> = Vec::new();
        for handle in handles {
            let handle = handle.as_ref().trim();
            if handle.is_empty() || bots.iter().any(|b| b.as_str() == handle) {
                continue;
            }
            bots.push(BotId::from(handle));
        }
        Self { bots }
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.bots.iter().any(|b| b.as_str() == handle)
    }

    /// Resolve a user selection to a recognized bot.
    pub fn resolve(&self, handle: Option<&str>) -> Result<BotId, ValidationError> {
        let handle = handle
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ValidationError::MissingBot)?;
        self.bots
            .iter()
            .find(|b| b.as_str() == handle)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownBot(handle.to_string()))
    }

    pub fn bots(&self) -> &[BotId] {
        &self.bots
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

impl Default for BotCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_BOTS.iter().copied())
    }
}
