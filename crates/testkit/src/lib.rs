//! # kvlog-testkit
//!
//! Test helpers and in-memory backends.
//! This crate depends on `ports` and `shared`.

pub mod in_memory;

pub use in_memory::{CapturedRecord, RecordingLogger};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
