//! Fixed mapping from caller level tags to backend severities.

use kvlog_domain::Level;
use kvlog_ports::Severity;

/// Every level tag and the backend severity it is emitted at.
pub const LEVEL_TABLE: [(Level, Severity); 7] = [
    (Level::Debug, Severity::Debug),
    (Level::Info, Severity::Info),
    (Level::Warn, Severity::Warn),
    (Level::Error, Severity::Error),
    (Level::DPanic, Severity::DPanic),
    (Level::Panic, Severity::Panic),
    (Level::Fatal, Severity::Fatal),
];

/// Look up the backend severity for `level`.
///
/// `None` means the table is missing an entry; callers treat that as a
/// validation error rather than picking a default.
pub fn resolve_severity(level: Level) -> Option<Severity> {
    LEVEL_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == level)
        .map(|(_, severity)| *severity)
}
