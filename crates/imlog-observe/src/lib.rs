//! Observability setup for imlog: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
