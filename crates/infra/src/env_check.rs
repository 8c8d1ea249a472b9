//! Environment validation and effective-config helpers.

use kvlog_config::{
    LoggerConfig, LoggerEnv, apply_env_overrides, load_logger_config_from_path, to_pretty_json,
};
use kvlog_shared::ErrorEnvelope;
use std::collections::BTreeMap;
use std::path::Path;

/// Infra-level error type (shared error envelope).
pub type InfraError = ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

/// Validate that the provided env overrides can be parsed and merged into a config.
pub fn validate_env_parsing(env: &BTreeMap<String, String>) -> InfraResult<()> {
    let parsed = LoggerEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    apply_env_overrides(LoggerConfig::default(), &parsed).map(drop)
}

/// Load and validate the effective config, returning deterministic pretty JSON.
pub fn load_effective_config_json(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
) -> InfraResult<String> {
    let parsed = LoggerEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    let config = load_logger_config_from_path(config_path, &parsed)?;
    to_pretty_json(config.as_ref())
}
