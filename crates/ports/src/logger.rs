//! Leveled structured logging boundary contract.

use kvlog_domain::{Field, Fields};
use kvlog_shared::Result;
use std::fmt;

/// Severity understood by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Debug.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
    /// Development-time panic.
    DPanic,
    /// Panic.
    Panic,
    /// Fatal.
    Fatal,
}

impl Severity {
    /// Numeric rank; higher is more severe.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warn => 30,
            Self::Error => 40,
            Self::DPanic => 50,
            Self::Panic => 60,
            Self::Fatal => 70,
        }
    }

    /// Lower-case backend name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Whether this severity passes a `min` threshold.
    #[must_use]
    pub const fn at_least(self, min: Self) -> bool {
        self.rank() >= min.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A single in-flight record opened by [`LeveledLogger::check`].
///
/// Nothing is written until [`LogRecord::commit`]; dropping a record discards it.
pub trait LogRecord: Send {
    /// Attach a field to the record.
    fn attach(&mut self, field: Field);

    /// Write the record to the backend.
    fn commit(self: Box<Self>) -> Result<()>;
}

/// Boundary contract for a leveled structured logger.
///
/// Implementations must be safe to share across threads; the adapter never
/// locks around them.
pub trait LeveledLogger: Send + Sync {
    /// Whether records at `severity` are currently written.
    fn is_enabled(&self, severity: Severity) -> bool;

    /// Open a record when `severity` is enabled, `None` otherwise.
    fn check(&self, severity: Severity, message: &str) -> Option<Box<dyn LogRecord + '_>>;

    /// Create a derived logger with `fields` applied to every record.
    ///
    /// The receiver is left unchanged.
    fn with(&self, fields: Fields) -> Box<dyn LeveledLogger>;

    /// Convenience: check, attach every field, commit.
    ///
    /// A disabled severity is a successful no-op.
    fn write(&self, severity: Severity, message: &str, fields: Fields) -> Result<()> {
        let Some(mut record) = self.check(severity, message) else {
            return Ok(());
        };
        for field in fields {
            record.attach(field);
        }
        record.commit()
    }
}
