//! Ready-made adapters.

use crate::logger_factory::leveled_logger;
use kvlog_adapters::StderrLogSink;
use kvlog_app::KvLogger;
use kvlog_config::LogFormat;
use kvlog_ports::{Fields, Severity};
use std::sync::Arc;

/// JSON lines on stderr, `INFO` and above.
#[must_use]
pub fn new_production_logger() -> KvLogger {
    preset(LogFormat::Json, Severity::Info)
}

/// Console lines on stderr, `DEBUG` and above.
#[must_use]
pub fn new_development_logger() -> KvLogger {
    preset(LogFormat::Console, Severity::Debug)
}

/// Adapter that accepts well-formed calls and writes nothing.
#[must_use]
pub fn new_nop_logger() -> KvLogger {
    preset(LogFormat::Nop, Severity::Fatal)
}

fn preset(format: LogFormat, min_severity: Severity) -> KvLogger {
    KvLogger::new(leveled_logger(
        format,
        min_severity,
        Fields::new(),
        Arc::new(StderrLogSink),
    ))
}
