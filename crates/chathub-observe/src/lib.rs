//! Observability setup for ChatHub: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
