//! BotBridge trait definition.
//!
//! Uses RPITIT for `send_user_message`; the returned update stream is boxed
//! so it can outlive the borrow of the bridge and cross task boundaries.

use std::pin::Pin;

use futures_util::Stream;

use chathub_types::bridge::{BridgeError, BridgeRequest, BridgeUpdate};

/// Stream of status-tagged updates for a single dispatch.
///
/// Bridges deliver `incomplete*` followed by exactly one `complete` or
/// `error`; consumers stop reading after the terminal update.
pub type BridgeStream = Pin<Box<dyn Stream<Item = BridgeUpdate> + Send + 'static>>;

/// Trait for host messaging bridges.
///
/// The availability probe is the presence of a bridge: the chat service is
/// constructed with `Option<BoxBotBridge>` and uses the simulated fallback
/// when it is `None`.
pub trait BotBridge: Send + Sync {
    /// Human-readable bridge name (e.g., "loopback").
    fn name(&self) -> &str;

    /// Dispatch a user message and return the stream of its updates.
    ///
    /// Resolves once the bridge has acknowledged the send. An `Err` is a
    /// transport failure and ends the dispatch with an error message.
    fn send_user_message(
        &self,
        request: BridgeRequest,
    ) -> impl std::future::Future<Output = Result<BridgeStream, BridgeError>> + Send;
}
