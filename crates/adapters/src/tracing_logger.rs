//! Backend forwarding records to the `tracing` ecosystem.
//!
//! `tracing` has no level above `ERROR`, so `DPanic`, `Panic` and `Fatal`
//! are emitted at `ERROR` and keep their exact name in the `severity` field.
//! Record fields are rendered as one JSON object in the `fields` field.

use crate::encoder::fields_to_map;
use kvlog_ports::{Field, Fields, LeveledLogger, LogRecord, Severity};
use kvlog_shared::Result;
use serde_json::Value;
use tracing::Level;

/// Logger that emits `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    base_fields: Fields,
    min_severity: Option<Severity>,
}

impl TracingLogger {
    /// Logger deferring entirely to the installed subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally drop severities below `severity`.
    #[must_use]
    pub const fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    /// Set base fields applied to every record.
    #[must_use]
    pub fn with_base_fields(mut self, fields: Fields) -> Self {
        self.base_fields = fields;
        self
    }
}

/// `tracing` level used for a severity.
#[must_use]
pub const fn tracing_level(severity: Severity) -> Level {
    match severity {
        Severity::Debug => Level::DEBUG,
        Severity::Info => Level::INFO,
        Severity::Warn => Level::WARN,
        Severity::Error | Severity::DPanic | Severity::Panic | Severity::Fatal => Level::ERROR,
    }
}

fn subscriber_enabled(severity: Severity) -> bool {
    match severity {
        Severity::Debug => tracing::enabled!(Level::DEBUG),
        Severity::Info => tracing::enabled!(Level::INFO),
        Severity::Warn => tracing::enabled!(Level::WARN),
        Severity::Error | Severity::DPanic | Severity::Panic | Severity::Fatal => {
            tracing::enabled!(Level::ERROR)
        },
    }
}

impl LeveledLogger for TracingLogger {
    fn is_enabled(&self, severity: Severity) -> bool {
        self.min_severity.is_none_or(|min| severity.at_least(min)) && subscriber_enabled(severity)
    }

    fn check(&self, severity: Severity, message: &str) -> Option<Box<dyn LogRecord + '_>> {
        if !self.is_enabled(severity) {
            return None;
        }
        Some(Box::new(TracingRecord {
            severity,
            message: message.to_owned(),
            fields: self.base_fields.clone(),
        }))
    }

    fn with(&self, fields: Fields) -> Box<dyn LeveledLogger> {
        let mut derived = self.clone();
        derived.base_fields.extend(fields);
        Box::new(derived)
    }
}

struct TracingRecord {
    severity: Severity,
    message: String,
    fields: Fields,
}

impl LogRecord for TracingRecord {
    fn attach(&mut self, field: Field) {
        self.fields.push(field);
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let severity = self.severity.as_str();
        let fields = Value::Object(fields_to_map(&self.fields));
        let message = self.message.as_str();
        match self.severity {
            Severity::Debug => {
                tracing::debug!(severity, fields = %fields, "{message}");
            },
            Severity::Info => {
                tracing::info!(severity, fields = %fields, "{message}");
            },
            Severity::Warn => {
                tracing::warn!(severity, fields = %fields, "{message}");
            },
            Severity::Error | Severity::DPanic | Severity::Panic | Severity::Fatal => {
                tracing::error!(severity, fields = %fields, "{message}");
            },
        }
        Ok(())
    }
}
