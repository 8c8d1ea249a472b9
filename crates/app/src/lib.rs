//! # kvlog-app
//!
//! The key/value structured log adapter.
//! This crate depends on `ports`, `domain`, and `shared`.
//!
//! [`KvLogger`] turns `[level, message, key, value, ...]` calls (or typed
//! level/message/field calls) into one structured record on an injected
//! [`LeveledLogger`](kvlog_ports::LeveledLogger) backend.

pub mod adapter;
pub mod error;
pub mod levels;

pub use adapter::{ERROR_CODE_FIELD, KeyValueLogger, KvLogger};
pub use error::LogError;
pub use levels::{LEVEL_TABLE, resolve_severity};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvlog_domain::domain_crate_version;
    use kvlog_ports::ports_crate_version;
    use kvlog_shared::shared_crate_version;

    #[test]
    fn app_can_use_ports_domain_shared() {
        assert!(!app_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
