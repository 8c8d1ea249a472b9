//! # kvlog-config
//!
//! Logger configuration schema, env overrides, and file loading.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_LOG_FIELDS, ENV_LOG_FORMAT, ENV_LOG_LEVEL, EnvParseError, LoggerEnv, apply_env_overrides,
};
pub use load::{
    load_logger_config_from_path, load_logger_config_from_sources, load_logger_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LogFormat, LoggerConfig, MAX_BASE_FIELDS,
    ValidatedLoggerConfig, parse_logger_config_json, parse_logger_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
