//! Bot bridge implementations.

pub mod loopback;

pub use loopback::LoopbackBridge;
