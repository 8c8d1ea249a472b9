//! Process-wide `tracing` subscriber setup.

use crate::InfraResult;
use kvlog_shared::{ErrorCode, ErrorEnvelope};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Output shape of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One flattened JSON object per event.
    Json,
}

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` wins over `default_directive`. A second call fails instead of
/// replacing the first subscriber.
pub fn init_tracing(format: TracingFormat, default_directive: &str) -> InfraResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("infra", "invalid_tracing_filter"),
                format!("invalid tracing filter: {error}"),
            )
            .with_metadata("directive", default_directive)
        })?;

    let result = match format {
        TracingFormat::Json => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init(),
        TracingFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
    };

    result.map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("infra", "tracing_already_initialized"),
            format!("failed to install tracing subscriber: {error}"),
        )
    })
}
