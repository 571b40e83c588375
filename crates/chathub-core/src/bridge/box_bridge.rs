//! BoxBotBridge -- object-safe dynamic dispatch wrapper for BotBridge.
//!
//! 1. Define an object-safe `BotBridgeDyn` trait with boxed futures
//! 2. Blanket-impl `BotBridgeDyn` for all `T: BotBridge`
//! 3. `BoxBotBridge` wraps `Box<dyn BotBridgeDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use chathub_types::bridge::{BridgeError, BridgeRequest};

use super::provider::{BotBridge, BridgeStream};

/// Object-safe version of [`BotBridge`] with boxed futures.
pub trait BotBridgeDyn: Send + Sync {
    fn name(&self) -> &str;

    fn send_boxed<'a>(
        &'a self,
        request: BridgeRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BridgeStream, BridgeError>> + Send + 'a>>;
}

impl<T: BotBridge> BotBridgeDyn for T {
    fn name(&self) -> &str {
        BotBridge::name(self)
    }

    fn send_boxed<'a>(
        &'a self,
        request: BridgeRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BridgeStream, BridgeError>> + Send + 'a>> {
        Box::pin(self.send_user_message(request))
    }
}

/// Type-erased bot bridge for runtime bridge selection.
pub struct BoxBotBridge {
    inner: Box<dyn BotBridgeDyn>,
}

impl BoxBotBridge {
    pub fn new<T: BotBridge + 'static>(bridge: T) -> Self {
        Self {
            inner: Box::new(bridge),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn send_user_message(
        &self,
        request: BridgeRequest,
    ) -> Result<BridgeStream, BridgeError> {
        self.inner.send_boxed(request).await
    }
}

impl std::fmt::Debug for BoxBotBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxBotBridge")
            .field("name", &self.inner.name())
            .finish()
    }
}
