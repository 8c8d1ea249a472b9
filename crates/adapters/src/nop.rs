//! Backend that discards everything.

use kvlog_ports::{Fields, LeveledLogger, LogRecord, Severity};

/// Logger with every severity disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl LeveledLogger for NopLogger {
    fn is_enabled(&self, _severity: Severity) -> bool {
        false
    }

    fn check(&self, _severity: Severity, _message: &str) -> Option<Box<dyn LogRecord + '_>> {
        None
    }

    fn with(&self, _fields: Fields) -> Box<dyn LeveledLogger> {
        Box::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvlog_ports::Field;

    #[test]
    fn nothing_is_ever_enabled() {
        let logger = NopLogger.with(vec![Field::new("a", 1)]);
        assert!(!logger.is_enabled(Severity::Fatal));
        assert!(logger.check(Severity::Fatal, "dropped").is_none());
        assert!(logger.write(Severity::Error, "dropped", Vec::new()).is_ok());
    }
}
