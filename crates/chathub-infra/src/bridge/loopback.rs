//! Loopback bot bridge for local development.
//!
//! Echoes the user's text back word by word as cumulative `incomplete`
//! updates, then a single `complete`. Exercises the full streaming path
//! without a host platform.

use std::time::Duration;

use chathub_core::bridge::{BotBridge, BridgeStream};
use chathub_types::bridge::{BotResponse, BridgeError, BridgeRequest, BridgeUpdate};
use tracing::debug;

/// Default pause between two streamed chunks.
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(60);

#[derive(Debug, Clone)]
pub struct LoopbackBridge {
    chunk_delay: Duration,
}

impl LoopbackBridge {
    pub fn new() -> Self {
        Self::with_chunk_delay(DEFAULT_CHUNK_DELAY)
    }

    pub fn with_chunk_delay(chunk_delay: Duration) -> Self {
        Self { chunk_delay }
    }

    /// Reply text for a request: the user's words with the bot mention removed.
    fn reply_for(request: &BridgeRequest) -> String {
        let mention = request.bot.mention();
        let text = request
            .text
            .strip_prefix(mention.as_str())
            .unwrap_or(&request.text)
            .trim();
        format!("{} a bien reçu : {text}", request.bot)
    }
}

impl Default for LoopbackBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl BotBridge for LoopbackBridge {
    fn name(&self) -> &str {
        "loopback"
    }

    async fn send_user_message(&self, request: BridgeRequest) -> Result<BridgeStream, BridgeError> {
        let reply = Self::reply_for(&request);
        let delay = self.chunk_delay;
        debug!(conversation_id = %request.conversation_id, "loopback dispatch accepted");

        Ok(Box::pin(async_stream::stream! {
            let mut partial = String::new();
            for word in reply.split_inclusive(' ') {
                tokio::time::sleep(delay).await;
                partial.push_str(word);
                yield BridgeUpdate::single(BotResponse::incomplete(partial.trim_end()));
            }
            tokio::time::sleep(delay).await;
            yield BridgeUpdate::single(BotResponse::complete(reply, None));
        }))
    }
}
