//! # kvlog-adapters
//!
//! Leveled logger backends (sink lines, `tracing`, no-op) and line sinks.
//! This crate depends on `ports` and `shared`.

pub mod encoder;
pub mod log_sink;
pub mod logger;
pub mod nop;
pub mod tracing_logger;

pub use encoder::LineEncoder;
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink, StdoutLogSink};
pub use logger::SinkLogger;
pub use nop::NopLogger;
pub use tracing_logger::{TracingLogger, tracing_level};

/// Crate version, used by dependency smoke tests.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
