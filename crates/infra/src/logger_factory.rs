//! Backend selection and adapter wiring.

use crate::InfraResult;
use kvlog_adapters::{LineEncoder, LogSink, NopLogger, SinkLogger, StderrLogSink, TracingLogger};
use kvlog_app::{KvLogger, LogError, resolve_severity};
use kvlog_config::{LogFormat, ValidatedLoggerConfig, load_logger_config_std_env};
use kvlog_ports::{Fields, LeveledLogger, Severity};
use kvlog_shared::ErrorEnvelope;
use std::path::Path;
use std::sync::Arc;

/// Build the backend described by `config`, writing lines to `sink`.
///
/// `sink` is ignored by the `tracing` and `nop` formats.
pub fn build_leveled_logger(
    config: &ValidatedLoggerConfig,
    sink: Arc<dyn LogSink>,
) -> InfraResult<Arc<dyn LeveledLogger>> {
    let level = config.level;
    let min_severity = resolve_severity(level)
        .ok_or_else(|| ErrorEnvelope::from(LogError::UnknownLevel { level }))?;
    Ok(leveled_logger(
        config.format,
        min_severity,
        config.base_fields(),
        sink,
    ))
}

/// Build an adapter from config, writing lines to stderr.
pub fn build_kv_logger(config: &ValidatedLoggerConfig) -> InfraResult<KvLogger> {
    build_kv_logger_with_sink(config, Arc::new(StderrLogSink))
}

/// Build an adapter from config, writing lines to `sink`.
pub fn build_kv_logger_with_sink(
    config: &ValidatedLoggerConfig,
    sink: Arc<dyn LogSink>,
) -> InfraResult<KvLogger> {
    build_leveled_logger(config, sink).map(KvLogger::new)
}

/// Load config from an optional file plus `KVLOG_*` env vars, then build.
pub fn kv_logger_from_env(config_path: Option<&Path>) -> InfraResult<KvLogger> {
    let config = load_logger_config_std_env(config_path)?;
    tracing::debug!(
        format = %config.format,
        level = %config.level,
        base_fields = config.base_fields.len(),
        "building key/value logger"
    );
    build_kv_logger(&config)
}

pub(crate) fn leveled_logger(
    format: LogFormat,
    min_severity: Severity,
    base_fields: Fields,
    sink: Arc<dyn LogSink>,
) -> Arc<dyn LeveledLogger> {
    match format {
        LogFormat::Json => Arc::new(
            SinkLogger::new(sink)
                .with_min_severity(min_severity)
                .with_base_fields(base_fields),
        ),
        LogFormat::Console => Arc::new(
            SinkLogger::new(sink)
                .with_encoder(LineEncoder::Console)
                .with_min_severity(min_severity)
                .with_base_fields(base_fields),
        ),
        LogFormat::Tracing => Arc::new(
            TracingLogger::new()
                .with_min_severity(min_severity)
                .with_base_fields(base_fields),
        ),
        LogFormat::Nop => Arc::new(NopLogger),
    }
}
