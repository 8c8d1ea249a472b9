//! # kvlog
//!
//! Facade API for consumers.
//! This crate depends on `infra`, `app`, `adapters`, and `config`.
//!
//! ```no_run
//! use kvlog::{Level, log_args, new_production_logger};
//!
//! let logger = new_production_logger();
//! let _ = logger.log(&log_args![Level::Info, "started", "port", 8080]);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

pub use kvlog_app::{ERROR_CODE_FIELD, KeyValueLogger, KvLogger, LogError, resolve_severity};
pub use kvlog_domain::{ERROR_FIELD, Field, Fields, Level, LevelParseError, LogArg, log_args};
pub use kvlog_ports::{LeveledLogger, LogRecord, Severity};

/// Backends and line sinks.
pub use kvlog_adapters::{
    LineEncoder, LogSink, MemoryLogSink, NopLogger, SinkLogger, StderrLogSink, StdoutLogSink,
    TracingLogger,
};

/// Config schema, env overrides, and loaders.
pub use kvlog_config::{
    LogFormat, LoggerConfig, LoggerEnv, ValidatedLoggerConfig, load_logger_config_from_path,
    load_logger_config_from_sources, load_logger_config_std_env,
};

/// Composition helpers and presets.
pub use kvlog_infra::{
    TracingFormat, build_kv_logger, build_kv_logger_with_sink, build_leveled_logger,
    init_tracing, kv_logger_from_env, new_development_logger, new_nop_logger,
    new_production_logger,
};

/// Infra error type (shared error envelope).
pub use kvlog_infra::InfraError;

/// Re-export redaction utilities for boundary sanitization.
pub use kvlog_shared::{REDACTED, is_secret_key, redact_if_secret};

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Validate that the provided env overrides can be parsed and merged into a config.
pub fn validate_env_parsing(env: &BTreeMap<String, String>) -> Result<(), InfraError> {
    kvlog_infra::validate_env_parsing(env)
}

/// Load and validate the effective config, returning deterministic pretty JSON.
pub fn load_effective_config_json(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
) -> Result<String, InfraError> {
    kvlog_infra::load_effective_config_json(env, config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_crate_compiles() {
        assert!(!facade_crate_version().is_empty());
        assert!(!kvlog_infra::infra_crate_version().is_empty());
    }

    #[test]
    fn invalid_env_is_reported_through_the_facade() {
        let mut env = BTreeMap::new();
        env.insert("KVLOG_LOG_LEVEL".to_string(), "verbose".to_string());

        let error = validate_env_parsing(&env).err();
        assert_eq!(
            error.map(|error| error.code.to_string()),
            Some("config:invalid_env_enum".to_string())
        );
    }
}
