//! Bot bridge abstraction for ChatHub.
//!
//! Defines the `BotBridge` trait over the host messaging bridge, an
//! object-safe `BoxBotBridge` wrapper for runtime selection, and the
//! per-dispatch state machine that maps bridge updates to store mutations.

pub mod box_bridge;
pub mod dispatch;
pub mod provider;

pub use box_bridge::BoxBotBridge;
pub use dispatch::{Dispatch, DispatchState, DispatchStep, Finished};
pub use provider::{BotBridge, BridgeStream};
