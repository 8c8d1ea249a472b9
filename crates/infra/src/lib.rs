//! # kvlog-infra
//!
//! Composition root: builds backends from config, offers presets, and
//! installs the process-wide `tracing` subscriber.
//! This crate depends on `app`, `adapters`, `config`, and `shared`.

/// Environment validation helpers.
pub mod env_check;
/// Backend selection from config.
pub mod logger_factory;
/// Ready-made adapters.
pub mod presets;
/// `tracing-subscriber` setup.
pub mod tracing_init;

pub use env_check::{InfraError, InfraResult, load_effective_config_json, validate_env_parsing};
pub use logger_factory::{
    build_kv_logger, build_kv_logger_with_sink, build_leveled_logger, kv_logger_from_env,
};
pub use presets::{new_development_logger, new_nop_logger, new_production_logger};
pub use tracing_init::{TracingFormat, init_tracing};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
