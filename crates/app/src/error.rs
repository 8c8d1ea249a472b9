//! Failures of a key/value log call.

use kvlog_domain::Level;
use kvlog_shared::{ErrorCode, ErrorEnvelope};

/// Why a log call was rejected or could not be written.
///
/// Everything but [`LogError::EmissionFailure`] is a caller contract
/// violation; none of them are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The call carried no arguments at all.
    #[error("key value pairs should not be empty")]
    EmptyArgs,
    /// A trailing key has no value.
    #[error("key value pairs should be an even number (got {count})")]
    OddArgCount {
        /// Number of arguments supplied.
        count: usize,
    },
    /// The first argument is not a level tag.
    #[error("first argument should be a level tag (got {found})")]
    InvalidLevelType {
        /// Type name of the argument found instead.
        found: &'static str,
    },
    /// The level tag has no backend severity.
    #[error("no backend severity for level {level}")]
    UnknownLevel {
        /// The unmapped level.
        level: Level,
    },
    /// A key position holds something other than text.
    #[error("key at position {position} should be a string (got {found})")]
    InvalidKeyType {
        /// Zero-based argument position of the key.
        position: usize,
        /// Type name of the argument found instead.
        found: &'static str,
    },
    /// The backend opened the record but failed to write it.
    #[error("failed to write log record: {source}")]
    EmissionFailure {
        /// Backend failure.
        #[source]
        source: ErrorEnvelope,
    },
}

impl LogError {
    /// Stable error code in the `log` namespace.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        let code = match self {
            Self::EmptyArgs => "empty_args",
            Self::OddArgCount { .. } => "odd_arg_count",
            Self::InvalidLevelType { .. } => "invalid_level_type",
            Self::UnknownLevel { .. } => "unknown_level",
            Self::InvalidKeyType { .. } => "invalid_key_type",
            Self::EmissionFailure { .. } => "emission_failure",
        };
        ErrorCode::new("log", code)
    }

    /// Whether the failure came from the backend rather than the call shape.
    #[must_use]
    pub const fn is_emission_failure(&self) -> bool {
        matches!(self, Self::EmissionFailure { .. })
    }
}

impl From<LogError> for ErrorEnvelope {
    fn from(error: LogError) -> Self {
        let code = error.code();
        let message = error.to_string();

        match error {
            LogError::EmptyArgs => Self::expected(code, message),
            LogError::OddArgCount { count } => {
                Self::expected(code, message).with_metadata("count", count.to_string())
            },
            LogError::InvalidLevelType { found } => {
                Self::expected(code, message).with_metadata("found", found)
            },
            LogError::UnknownLevel { level } => {
                Self::invariant(code, message).with_metadata("level", level.as_str())
            },
            LogError::InvalidKeyType { position, found } => Self::expected(code, message)
                .with_metadata("position", position.to_string())
                .with_metadata("found", found),
            LogError::EmissionFailure { source } => {
                let mut envelope = Self {
                    code,
                    message,
                    ..source.clone()
                };
                envelope
                    .metadata
                    .insert("backend_code".to_string(), source.code.to_string());
                envelope
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvlog_shared::{ErrorClass, ErrorKind};

    #[test]
    fn contract_violations_are_expected_errors() {
        let envelope: ErrorEnvelope = LogError::InvalidKeyType {
            position: 2,
            found: "number",
        }
        .into();
        assert_eq!(envelope.kind, ErrorKind::Expected);
        assert_eq!(envelope.class, ErrorClass::NonRetriable);
        assert_eq!(envelope.code.to_string(), "log:invalid_key_type");
        assert_eq!(
            envelope.metadata.get("position").map(String::as_str),
            Some("2")
        );
        assert_eq!(
            envelope.metadata.get("found").map(String::as_str),
            Some("number")
        );
    }

    #[test]
    fn unknown_level_is_an_invariant() {
        let envelope: ErrorEnvelope = LogError::UnknownLevel {
            level: Level::DPanic,
        }
        .into();
        assert_eq!(envelope.kind, ErrorKind::Invariant);
        assert_eq!(
            envelope.metadata.get("level").map(String::as_str),
            Some("DPANIC")
        );
    }

    #[test]
    fn emission_failure_keeps_backend_classification() {
        let backend =
            ErrorEnvelope::unexpected(ErrorCode::sink_closed(), "pipe closed", ErrorClass::NonRetriable);
        let error = LogError::EmissionFailure { source: backend };
        assert!(error.is_emission_failure());
        assert!(error.to_string().contains("pipe closed"));

        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.kind, ErrorKind::Unexpected);
        assert_eq!(envelope.code.to_string(), "log:emission_failure");
        assert_eq!(
            envelope.metadata.get("backend_code").map(String::as_str),
            Some("core:sink_closed")
        );
    }

    #[test]
    fn messages_name_the_offending_shape() {
        assert_eq!(
            LogError::OddArgCount { count: 3 }.to_string(),
            "key value pairs should be an even number (got 3)"
        );
        assert_eq!(
            LogError::InvalidLevelType { found: "string" }.to_string(),
            "first argument should be a level tag (got string)"
        );
    }
}
