//! Sink-backed structured logger.

use crate::encoder::LineEncoder;
use crate::log_sink::LogSink;
use chrono::{DateTime, Utc};
use kvlog_ports::{Field, Fields, LeveledLogger, LogRecord, Severity};
use kvlog_shared::{ErrorEnvelope, Result};
use std::fmt;
use std::sync::Arc;

/// Logger emitting one encoded line per committed record.
#[derive(Clone)]
pub struct SinkLogger {
    sink: Arc<dyn LogSink>,
    encoder: LineEncoder,
    base_fields: Fields,
    min_severity: Severity,
}

impl SinkLogger {
    /// Create a JSON logger at `Info` backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            encoder: LineEncoder::Json,
            base_fields: Fields::new(),
            min_severity: Severity::Info,
        }
    }

    /// Set the line encoder.
    #[must_use]
    pub const fn with_encoder(mut self, encoder: LineEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Set base fields applied to every record.
    #[must_use]
    pub fn with_base_fields(mut self, fields: Fields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum severity.
    #[must_use]
    pub const fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Minimum severity written by this logger.
    #[must_use]
    pub const fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Base fields applied to every record.
    #[must_use]
    pub fn base_fields(&self) -> &[Field] {
        &self.base_fields
    }
}

impl LeveledLogger for SinkLogger {
    fn is_enabled(&self, severity: Severity) -> bool {
        severity.at_least(self.min_severity)
    }

    fn check(&self, severity: Severity, message: &str) -> Option<Box<dyn LogRecord + '_>> {
        if !self.is_enabled(severity) {
            return None;
        }
        Some(Box::new(SinkRecord {
            logger: self,
            timestamp: Utc::now(),
            severity,
            message: message.to_owned(),
            fields: self.base_fields.clone(),
        }))
    }

    fn with(&self, fields: Fields) -> Box<dyn LeveledLogger> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            sink: Arc::clone(&self.sink),
            encoder: self.encoder,
            base_fields: merged,
            min_severity: self.min_severity,
        })
    }
}

impl fmt::Debug for SinkLogger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SinkLogger")
            .field("encoder", &self.encoder)
            .field("min_severity", &self.min_severity)
            .field("base_fields", &self.base_fields.len())
            .finish_non_exhaustive()
    }
}

struct SinkRecord<'a> {
    logger: &'a SinkLogger,
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: String,
    fields: Fields,
}

impl LogRecord for SinkRecord<'_> {
    fn attach(&mut self, field: Field) {
        self.fields.push(field);
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let line = self.logger.encoder.encode(
            self.timestamp,
            self.severity,
            &self.message,
            &self.fields,
        );
        self.logger
            .sink
            .write_line(&line)
            .map_err(ErrorEnvelope::from)
    }
}
