//! Key/value log adapter over a leveled structured backend.
//!
//! Two entry points share one emission path:
//!
//! - [`KvLogger::log`] takes the positional `[level, message, key, value, ...]`
//!   shape and validates it strictly in order (empty, odd length, level tag,
//!   level mapping, key types) before touching the backend.
//! - [`KvLogger::log_fields`] takes a level, a message and typed fields.
//!
//! After validation the backend is asked whether the severity is enabled.
//! A disabled severity is a successful no-op and no field is built. Every
//! failure is returned to the caller and also reported through the same
//! backend at ERROR.

use crate::error::LogError;
use crate::levels::resolve_severity;
use kvlog_domain::{Field, Level, LogArg};
use kvlog_ports::{LeveledLogger, Severity};
use std::fmt;
use std::sync::Arc;

/// Field name carrying the stable error code on self-reported failures.
pub const ERROR_CODE_FIELD: &str = "errorCode";

/// The generic "level + message + key/value pairs" logging interface.
pub trait KeyValueLogger: Send + Sync {
    /// Log `[level, message, key1, value1, ...]`.
    fn log(&self, args: &[LogArg]) -> Result<(), LogError>;
}

/// Adapter from key/value calls to a [`LeveledLogger`] backend.
///
/// Cloning is cheap and clones share the backend.
#[derive(Clone)]
pub struct KvLogger {
    backend: Arc<dyn LeveledLogger>,
}

impl KvLogger {
    /// Wrap a shared backend.
    #[must_use]
    pub fn new(backend: Arc<dyn LeveledLogger>) -> Self {
        Self { backend }
    }

    /// Wrap an owned backend.
    #[must_use]
    pub fn from_boxed(backend: Box<dyn LeveledLogger>) -> Self {
        Self {
            backend: Arc::from(backend),
        }
    }

    /// Borrow the backend.
    #[must_use]
    pub const fn backend(&self) -> &Arc<dyn LeveledLogger> {
        &self.backend
    }

    /// Whether a call at `level` would currently be written.
    pub fn is_enabled(&self, level: Level) -> bool {
        resolve_severity(level).is_some_and(|severity| self.backend.is_enabled(severity))
    }

    /// Log a positional `[level, message, key1, value1, ...]` call.
    pub fn log(&self, args: &[LogArg]) -> Result<(), LogError> {
        let result = self.log_positional(args);
        if let Err(error) = &result {
            self.report(error);
        }
        result
    }

    /// Log `message` at `level` with typed fields.
    pub fn log_fields<I>(
        &self,
        level: Level,
        message: impl fmt::Display,
        fields: I,
    ) -> Result<(), LogError>
    where
        I: IntoIterator<Item = Field>,
    {
        let result = resolve_severity(level)
            .ok_or(LogError::UnknownLevel { level })
            .and_then(|severity| self.emit(severity, &message.to_string(), fields));
        if let Err(error) = &result {
            self.report(error);
        }
        result
    }

    /// Convenience: DEBUG with typed fields.
    pub fn debug<I>(&self, message: impl fmt::Display, fields: I) -> Result<(), LogError>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log_fields(Level::Debug, message, fields)
    }

    /// Convenience: INFO with typed fields.
    pub fn info<I>(&self, message: impl fmt::Display, fields: I) -> Result<(), LogError>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log_fields(Level::Info, message, fields)
    }

    /// Convenience: WARN with typed fields.
    pub fn warn<I>(&self, message: impl fmt::Display, fields: I) -> Result<(), LogError>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log_fields(Level::Warn, message, fields)
    }

    /// Convenience: ERROR with typed fields.
    pub fn error<I>(&self, message: impl fmt::Display, fields: I) -> Result<(), LogError>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log_fields(Level::Error, message, fields)
    }

    /// Derive an adapter whose records all carry `fields`.
    ///
    /// `self` keeps logging without them.
    #[must_use]
    pub fn with<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Self::from_boxed(self.backend.with(fields.into_iter().collect()))
    }

    /// Attach `fields` to every later record logged through this handle.
    ///
    /// Only this handle changes; clones made earlier keep their backend.
    pub fn scope<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        *self = self.with(fields);
    }

    fn log_positional(&self, args: &[LogArg]) -> Result<(), LogError> {
        let call = parse_call(args)?;
        let fields = call.pairs.chunks_exact(2).filter_map(|pair| match pair {
            [key, value] => key
                .as_key()
                .map(|name| Field::new(name, value.to_value())),
            _ => None,
        });
        self.emit(call.severity, &call.message, fields)
    }

    fn emit<I>(&self, severity: Severity, message: &str, fields: I) -> Result<(), LogError>
    where
        I: IntoIterator<Item = Field>,
    {
        let Some(mut record) = self.backend.check(severity, message) else {
            return Ok(());
        };
        for field in fields {
            record.attach(field);
        }
        record
            .commit()
            .map_err(|source| LogError::EmissionFailure { source })
    }

    // Talks to the backend directly so a report can never re-enter validation.
    fn report(&self, error: &LogError) {
        let message = error.to_string();
        let Some(mut record) = self.backend.check(Severity::Error, &message) else {
            return;
        };
        record.attach(Field::error(error));
        record.attach(Field::display(ERROR_CODE_FIELD, &error.code()));
        if let Err(commit_error) = record.commit() {
            tracing::debug!(
                error = %commit_error,
                code = %error.code(),
                "log adapter could not report its own failure"
            );
        }
    }
}

impl KeyValueLogger for KvLogger {
    fn log(&self, args: &[LogArg]) -> Result<(), LogError> {
        Self::log(self, args)
    }
}

impl fmt::Debug for KvLogger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("KvLogger").finish_non_exhaustive()
    }
}

/// A positional call that passed validation.
#[derive(Debug)]
struct KvCall<'a> {
    severity: Severity,
    message: String,
    pairs: &'a [LogArg],
}

fn parse_call(args: &[LogArg]) -> Result<KvCall<'_>, LogError> {
    let (head, rest) = args.split_first().ok_or(LogError::EmptyArgs)?;
    if args.len() % 2 != 0 {
        return Err(LogError::OddArgCount { count: args.len() });
    }

    let level = head.as_level().ok_or(LogError::InvalidLevelType {
        found: head.type_name(),
    })?;
    let severity = resolve_severity(level).ok_or(LogError::UnknownLevel { level })?;

    // Even and non-empty, so the message slot exists.
    let (message, pairs) = rest
        .split_first()
        .ok_or(LogError::OddArgCount { count: args.len() })?;

    for (index, key) in pairs.iter().step_by(2).enumerate() {
        if key.as_key().is_none() {
            return Err(LogError::InvalidKeyType {
                position: 2 + index * 2,
                found: key.type_name(),
            });
        }
    }

    Ok(KvCall {
        severity,
        message: message.render(),
        pairs,
    })
}
