//! Environment variable parsing and env-to-config merging.
//!
//! This module keeps env parsing:
//! - strict (invalid values fail fast)
//! - deterministic (field lists keep their declaration order, last entry wins)
//! - safe (secret values are redacted in error metadata)

use crate::schema::{LogFormat, LoggerConfig, MAX_BASE_FIELDS, ValidatedLoggerConfig};
use kvlog_domain::Level;
use kvlog_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Env var: backend format (`json`, `console`, `tracing`, `nop`).
pub const ENV_LOG_FORMAT: &str = "KVLOG_LOG_FORMAT";
/// Env var: minimum level.
pub const ENV_LOG_LEVEL: &str = "KVLOG_LOG_LEVEL";
/// Env var: base fields as `name=value` CSV.
pub const ENV_LOG_FIELDS: &str = "KVLOG_LOG_FIELDS";

const ALL_ENV_VARS: [&str; 3] = [ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_LOG_FIELDS];

/// Parsed logger env overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerEnv {
    /// Backend format override.
    pub format: Option<LogFormat>,
    /// Minimum level override.
    pub level: Option<Level>,
    /// Extra base fields, in declaration order.
    pub fields: Vec<(String, String)>,
}

impl LoggerEnv {
    /// Parse overrides from an explicit map of env vars.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let format = parse_optional_enum(map, ENV_LOG_FORMAT, LogFormat::parse)?;
        let level = parse_optional_enum(map, ENV_LOG_LEVEL, Level::parse)?;
        let fields = match read_trimmed(map, ENV_LOG_FIELDS)? {
            None => Vec::new(),
            Some(raw) => parse_field_list(ENV_LOG_FIELDS, raw)?,
        };

        Ok(Self {
            format,
            level,
            fields,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// Whether no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.format.is_none() && self.level.is_none() && self.fields.is_empty()
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: LoggerConfig,
    env: &LoggerEnv,
) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(level) = env.level {
        config.level = level;
    }
    for (name, value) in &env.fields {
        // Env names are trimmed already; drop file entries that only differ by padding.
        config
            .base_fields
            .retain(|existing, _| existing.trim() != name);
        config
            .base_fields
            .insert(name.clone(), Value::String(value.clone()));
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// CSV list exceeds a safety limit.
    CsvTooLarge {
        /// Env var name.
        var: &'static str,
        /// Number of entries.
        len: usize,
        /// Maximum allowed entries.
        max: usize,
    },
    /// A field entry is not `name=value` with a non-empty name.
    InvalidFieldEntry {
        /// Env var name.
        var: &'static str,
        /// Raw entry.
        entry: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::CsvTooLarge { .. } | Self::InvalidFieldEntry { .. } => {
                ErrorCode::new("config", "invalid_env_csv")
            },
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
            Self::CsvTooLarge { var, len, max } => {
                write!(formatter, "{var} is too large ({len} items, max {max})")
            },
            Self::InvalidFieldEntry { var, .. } => {
                write!(formatter, "{var} entries must look like name=value")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", redact_if_secret(var, &value)),
            EnvParseError::CsvTooLarge { var, len, max } => envelope
                .with_metadata("env_var", var)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
            EnvParseError::InvalidFieldEntry { var, entry } => envelope
                .with_metadata("env_var", var)
                .with_metadata("entry", redact_if_secret(&entry, &entry)),
        }
    }
}

fn read_trimmed<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    match map.get(var) {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(EnvParseError::EmptyValue { var });
            }
            Ok(Some(trimmed))
        },
    }
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    read_trimmed(map, var)?
        .map(|raw| {
            parse(raw).ok_or_else(|| EnvParseError::InvalidEnum {
                var,
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn parse_field_list(var: &'static str, raw: &str) -> Result<Vec<(String, String)>, EnvParseError> {
    let entries = parse_csv(raw);
    if entries.len() > MAX_BASE_FIELDS {
        return Err(EnvParseError::CsvTooLarge {
            var,
            len: entries.len(),
            max: MAX_BASE_FIELDS,
        });
    }

    entries
        .into_iter()
        .map(|entry| match entry.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            },
            _ => Err(EnvParseError::InvalidFieldEntry {
                var,
                entry: entry.to_string(),
            }),
        })
        .collect()
}

fn parse_csv(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn missing_vars_mean_no_overrides() -> Result<(), Box<dyn Error>> {
        let env = LoggerEnv::from_map(&BTreeMap::new())?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn field_list_keeps_declaration_order() -> Result<(), Box<dyn Error>> {
        let env = LoggerEnv::from_map(&env_map(&[(
            ENV_LOG_FIELDS,
            " service = billing ,, region=eu-west-1 ,note=a=b",
        )]))?;
        assert_eq!(
            env.fields,
            vec![
                ("service".to_string(), "billing".to_string()),
                ("region".to_string(), "eu-west-1".to_string()),
                ("note".to_string(), "a=b".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn entry_without_name_is_rejected() {
        let result = LoggerEnv::from_map(&env_map(&[(ENV_LOG_FIELDS, "=value")]));
        assert_eq!(
            result,
            Err(EnvParseError::InvalidFieldEntry {
                var: ENV_LOG_FIELDS,
                entry: "=value".to_string(),
            })
        );

        let result = LoggerEnv::from_map(&env_map(&[(ENV_LOG_FIELDS, "justaname")]));
        assert!(matches!(
            result,
            Err(EnvParseError::InvalidFieldEntry { .. })
        ));
    }

    #[test]
    fn env_field_replaces_padded_config_name() -> Result<(), Box<dyn Error>> {
        let mut base = LoggerConfig::default();
        base.base_fields
            .insert(" service ".to_string(), Value::from("billing"));
        let env = LoggerEnv::from_map(&env_map(&[(ENV_LOG_FIELDS, "service=ledger")]))?;

        let config = apply_env_overrides(base, &env)?;
        assert_eq!(config.base_fields.len(), 1);
        assert_eq!(
            config.base_fields.get("service"),
            Some(&Value::from("ledger"))
        );
        Ok(())
    }

    #[test]
    fn blank_value_is_rejected() {
        let result = LoggerEnv::from_map(&env_map(&[(ENV_LOG_LEVEL, "   ")]));
        assert_eq!(
            result,
            Err(EnvParseError::EmptyValue { var: ENV_LOG_LEVEL })
        );
    }

    #[test]
    fn secret_field_entries_are_redacted_in_metadata() {
        let error = EnvParseError::InvalidFieldEntry {
            var: ENV_LOG_FIELDS,
            entry: "apiKey".to_string(),
        };
        let envelope: ErrorEnvelope = error.into();
        assert_eq!(
            envelope.metadata.get("entry").map(String::as_str),
            Some(kvlog_shared::REDACTED)
        );
    }
}
