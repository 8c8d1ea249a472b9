//! # kvlog-domain
//!
//! Caller-facing vocabulary of the key/value log adapter:
//!
//! - **Level** - the severity tag a call is made at (`DEBUG` .. `FATAL`)
//! - **Field** - a named JSON value attached to one record
//! - **`LogArg`** - one positional argument of the key/value call shape
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No backend or adapter dependencies
//! - Pure values with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use kvlog_shared::shared_crate_version;

pub mod arg;
pub mod field;
pub mod level;

pub use arg::LogArg;
pub use field::{ERROR_FIELD, Field, Fields};
pub use level::{Level, LevelParseError};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
