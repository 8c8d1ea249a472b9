//! Log level tags accepted by the adapter.

use kvlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity tag of a log call.
///
/// The set is closed; the adapter maps each tag onto exactly one backend
/// severity. Ordering follows severity (`Debug` is the lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Verbose diagnostics, usually disabled in production.
    #[serde(alias = "debug")]
    Debug,
    /// Routine operational messages.
    #[serde(alias = "info")]
    Info,
    /// Something unexpected that the caller recovered from.
    #[serde(alias = "warn")]
    Warn,
    /// A failed operation.
    #[serde(alias = "error")]
    Error,
    /// A condition that is a bug in development builds.
    #[serde(alias = "dpanic")]
    DPanic,
    /// A condition the caller treats as unrecoverable.
    #[serde(alias = "panic")]
    Panic,
    /// A condition after which the process is expected to stop.
    #[serde(alias = "fatal")]
    Fatal,
}

impl Level {
    /// Every level, lowest severity first.
    pub const ALL: [Self; 7] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::DPanic,
        Self::Panic,
        Self::Fatal,
    ];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::DPanic => "DPANIC",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Parse a level name, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input).ok_or_else(|| LevelParseError {
            input: input.to_owned(),
        })
    }
}

/// A level name did not match any known level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    /// Raw input that failed to parse.
    pub input: String,
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown log level: {:?}", self.input)
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("domain", "invalid_level"), message)
            .with_metadata("input", error.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn names_round_trip_through_parse() {
        for level in Level::ALL {
            assert_eq!(Level::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(Level::parse(" dpanic "), Some(Level::DPanic));
        assert_eq!(Level::parse("Warn"), Some(Level::Warn));
        assert_eq!(Level::parse("warning"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::DPanic);
        assert!(Level::Panic < Level::Fatal);
    }

    #[test]
    fn from_str_error_maps_into_envelope() -> Result<(), String> {
        let Err(error) = "loud".parse::<Level>() else {
            return Err("expected parse failure".to_string());
        };
        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.code.code(), "invalid_level");
        assert_eq!(
            envelope.metadata.get("input").map(String::as_str),
            Some("loud")
        );
        Ok(())
    }

    #[test]
    fn serde_uses_upper_case_names_and_accepts_lower_case() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Level::DPanic)?, "\"DPANIC\"");
        let parsed: Level = serde_json::from_str("\"fatal\"")?;
        assert_eq!(parsed, Level::Fatal);
        Ok(())
    }

    proptest! {
        #[test]
        fn parse_accepts_any_casing(index in 0usize..7, mask in any::<u8>()) {
            let level = Level::ALL[index];
            let mixed: String = level
                .as_str()
                .chars()
                .enumerate()
                .map(|(position, ch)| {
                    if mask & (1 << (position % 8)) == 0 {
                        ch.to_ascii_lowercase()
                    } else {
                        ch
                    }
                })
                .collect();
            prop_assert_eq!(Level::parse(&mixed), Some(level));
        }
    }
}
