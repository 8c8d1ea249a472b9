//! In-memory backend implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests of the adapter
//! - Deterministic contract tests for the ports layer

use kvlog_ports::{Field, Fields, LeveledLogger, LogRecord, Severity};
use kvlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// A record as the backend saw it at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Severity the record was opened at.
    pub severity: Severity,
    /// Message passed to `check`.
    pub message: String,
    /// Base fields followed by attached fields, in order.
    pub fields: Fields,
}

impl CapturedRecord {
    /// Look up the last field named `name`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.name() == name)
            .map(Field::value)
    }

    /// Field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }
}

#[derive(Debug, Default)]
struct RecorderState {
    records: Vec<CapturedRecord>,
    checks: Vec<Severity>,
    attach_calls: usize,
}

/// Backend that keeps every committed record in memory.
///
/// Clones and derived loggers (`with`) share one capture store, so a test can
/// hand a clone to the adapter and inspect the records through this handle.
#[derive(Debug, Clone)]
pub struct RecordingLogger {
    state: Arc<Mutex<RecorderState>>,
    fail_commits: Arc<AtomicBool>,
    base_fields: Fields,
    min_severity: Severity,
}

impl Default for RecordingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingLogger {
    /// Recorder with every severity enabled.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RecorderState::default())),
            fail_commits: Arc::new(AtomicBool::new(false)),
            base_fields: Fields::new(),
            min_severity: Severity::Debug,
        }
    }

    /// Disable severities below `min`.
    #[must_use]
    pub fn with_min_severity(mut self, min: Severity) -> Self {
        self.min_severity = min;
        self
    }

    /// Make every later commit fail (shared by clones and derived loggers).
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of committed records.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().records.clone()
    }

    /// Drain committed records.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut self.lock().records)
    }

    /// Severities passed to `check`, in call order.
    pub fn check_calls(&self) -> Vec<Severity> {
        self.lock().checks.clone()
    }

    /// Number of `attach` calls across all records.
    pub fn attach_calls(&self) -> usize {
        self.lock().attach_calls
    }

    fn lock(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().expect("recorder state lock")
    }
}

impl LeveledLogger for RecordingLogger {
    fn is_enabled(&self, severity: Severity) -> bool {
        severity.at_least(self.min_severity)
    }

    fn check(&self, severity: Severity, message: &str) -> Option<Box<dyn LogRecord + '_>> {
        self.lock().checks.push(severity);
        if !self.is_enabled(severity) {
            return None;
        }
        Some(Box::new(RecordingRecord {
            logger: self,
            record: CapturedRecord {
                severity,
                message: message.to_owned(),
                fields: self.base_fields.clone(),
            },
        }))
    }

    fn with(&self, fields: Fields) -> Box<dyn LeveledLogger> {
        let mut derived = self.clone();
        derived.base_fields.extend(fields);
        Box::new(derived)
    }
}

struct RecordingRecord<'a> {
    logger: &'a RecordingLogger,
    record: CapturedRecord,
}

impl LogRecord for RecordingRecord<'_> {
    fn attach(&mut self, field: Field) {
        self.logger.lock().attach_calls += 1;
        self.record.fields.push(field);
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let Self { logger, record } = *self;
        if logger.fail_commits.load(Ordering::SeqCst) {
            return Err(ErrorEnvelope::unexpected(
                ErrorCode::io(),
                "recording backend rejected the record",
                ErrorClass::NonRetriable,
            ));
        }
        logger.lock().records.push(record);
        Ok(())
    }
}
