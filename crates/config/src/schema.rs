//! Logger configuration schema, presets, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Base field names are trimmed; `BTreeMap` keeps them in stable order.

use kvlog_domain::{Field, Fields, Level};
use kvlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Maximum number of base fields a config may carry.
pub const MAX_BASE_FIELDS: usize = 64;

/// Which backend a config builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines on stderr.
    #[default]
    Json,
    /// Tab-separated lines on stderr.
    Console,
    /// Events forwarded to the installed `tracing` subscriber.
    Tracing,
    /// Everything discarded.
    Nop,
}

impl LogFormat {
    /// Every format, in declaration order.
    pub const ALL: [Self; 4] = [Self::Json, Self::Console, Self::Tracing, Self::Nop];

    /// Lower-case config name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Console => "console",
            Self::Tracing => "tracing",
            Self::Nop => "nop",
        }
    }

    /// Case-insensitive parse of a config name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Top-level logger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Backend selection.
    pub format: LogFormat,
    /// Minimum level written.
    pub level: Level,
    /// Fields attached to every record.
    pub base_fields: BTreeMap<String, Value>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggerConfig {
    /// JSON lines at `INFO`.
    #[must_use]
    pub const fn production() -> Self {
        Self::preset(LogFormat::Json, Level::Info)
    }

    /// Console lines at `DEBUG`.
    #[must_use]
    pub const fn development() -> Self {
        Self::preset(LogFormat::Console, Level::Debug)
    }

    /// Discard everything.
    #[must_use]
    pub const fn nop() -> Self {
        Self::preset(LogFormat::Nop, Level::Info)
    }

    const fn preset(format: LogFormat, level: Level) -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            format,
            level,
            base_fields: BTreeMap::new(),
        }
    }

    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedLoggerConfig, ConfigSchemaError> {
        self.validate_version()?;
        self.normalize_base_fields()?;
        Ok(ValidatedLoggerConfig { raw: self })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }

    fn normalize_base_fields(&mut self) -> Result<(), ConfigSchemaError> {
        let mut normalized = BTreeMap::new();
        for (name, value) in std::mem::take(&mut self.base_fields) {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::InvalidBaseFieldName { name });
            }
            if normalized.contains_key(trimmed) {
                return Err(ConfigSchemaError::DuplicateBaseFieldName {
                    name: trimmed.to_string(),
                });
            }
            normalized.insert(trimmed.to_string(), value);
        }

        if normalized.len() > MAX_BASE_FIELDS {
            return Err(ConfigSchemaError::TooManyBaseFields {
                len: normalized.len(),
                max: MAX_BASE_FIELDS,
            });
        }

        self.base_fields = normalized;
        Ok(())
    }
}

/// Validated config wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLoggerConfig {
    raw: LoggerConfig,
}

impl ValidatedLoggerConfig {
    /// Base fields as log fields, ordered by name.
    #[must_use]
    pub fn base_fields(&self) -> Fields {
        self.raw
            .base_fields
            .iter()
            .map(|(name, value)| Field::new(name.as_str(), value.clone()))
            .collect()
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggerConfig {
        self.raw
    }
}

impl AsRef<LoggerConfig> for ValidatedLoggerConfig {
    fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggerConfig {
    type Target = LoggerConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Validation failures for [`LoggerConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A base field name is empty after trimming.
    InvalidBaseFieldName {
        /// Raw name as found in the config.
        name: String,
    },
    /// Two base field names are equal after trimming.
    DuplicateBaseFieldName {
        /// Trimmed name shared by both entries.
        name: String,
    },
    /// Too many base fields.
    TooManyBaseFields {
        /// Number of fields after normalization.
        len: usize,
        /// Maximum allowed number of fields.
        max: usize,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidBaseFieldName { .. } => ErrorCode::new("config", "invalid_field_name"),
            Self::DuplicateBaseFieldName { .. } => {
                ErrorCode::new("config", "duplicate_field_name")
            },
            Self::TooManyBaseFields { .. } => ErrorCode::new("config", "list_too_large"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::InvalidBaseFieldName { name } => {
                write!(formatter, "baseFields contains an empty field name: {name:?}")
            },
            Self::DuplicateBaseFieldName { name } => {
                write!(formatter, "baseFields contains {name:?} more than once")
            },
            Self::TooManyBaseFields { len, max } => write!(
                formatter,
                "baseFields must have at most {max} entries (got {len})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::InvalidBaseFieldName { name } => envelope
                .with_metadata("field", "baseFields")
                .with_metadata("name", name),
            ConfigSchemaError::DuplicateBaseFieldName { name } => envelope
                .with_metadata("field", "baseFields")
                .with_metadata("name", name),
            ConfigSchemaError::TooManyBaseFields { len, max } => envelope
                .with_metadata("field", "baseFields")
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

/// Parse a logger config from a JSON string, applying validation and normalization.
pub fn parse_logger_config_json(input: &str) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let config: LoggerConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a logger config from a TOML string, applying validation and normalization.
pub fn parse_logger_config_toml(input: &str) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let config: LoggerConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}
