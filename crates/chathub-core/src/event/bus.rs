//! Change notifications for the presentation layer.
//!
//! The store and the dispatch tasks publish `ChatEvent`s here; a UI
//! subscribes once and re-renders from the events instead of being called
//! back directly.

use chathub_types::event::ChatEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Fan-out of `ChatEvent`s over `tokio::sync::broadcast`.
///
/// Clones share one channel. Publishing never blocks; a subscriber that falls
/// more than `capacity` events behind sees `RecvError::Lagged` and resumes
/// from the oldest retained event.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ChatEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.sender.subscribe()
    }

    /// Dropped silently when nobody is subscribed.
    pub fn publish(&self, event: ChatEvent) {
        trace!(conversation_id = ?event.conversation_id(), ?event, "chat event");
        let _ = self.sender.send(event);
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
