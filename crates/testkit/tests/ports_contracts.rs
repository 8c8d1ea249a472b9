//! Contract-style tests for the leveled logger port using the recording backend.

use kvlog_domain::Field;
use kvlog_ports::{LeveledLogger, Severity};
use kvlog_shared::{ErrorKind, Result};
use kvlog_testkit::RecordingLogger;
use serde_json::json;

#[test]
fn check_respects_min_severity() {
    let recorder = RecordingLogger::new().with_min_severity(Severity::Warn);

    assert!(recorder.check(Severity::Info, "dropped").is_none());
    assert!(recorder.check(Severity::Fatal, "opened").is_some());
    assert!(!recorder.is_enabled(Severity::Debug));
    assert_eq!(
        recorder.check_calls(),
        vec![Severity::Info, Severity::Fatal]
    );
    // Opened but never committed.
    assert!(recorder.records().is_empty());
}

#[test]
fn committed_records_keep_attach_order() -> Result<()> {
    let recorder = RecordingLogger::new();
    recorder.write(
        Severity::Info,
        "served",
        vec![Field::new("status", 200), Field::new("path", "/")],
    )?;

    let records = recorder.take();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "served");
    assert_eq!(records[0].field_names(), vec!["status", "path"]);
    assert_eq!(records[0].field("status"), Some(&json!(200)));
    assert_eq!(recorder.attach_calls(), 2);
    assert!(recorder.records().is_empty());
    Ok(())
}

#[test]
fn derived_logger_does_not_leak_fields_into_parent() -> Result<()> {
    let recorder = RecordingLogger::new();
    let derived = recorder.with(vec![Field::new("requestId", "r-1")]);

    derived.write(Severity::Info, "child", Vec::new())?;
    recorder.write(Severity::Info, "parent", Vec::new())?;

    let records = recorder.take();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].field("requestId"), Some(&json!("r-1")));
    assert_eq!(records[1].field("requestId"), None);
    Ok(())
}

#[test]
fn failing_commits_surface_unexpected_errors() {
    let recorder = RecordingLogger::new();
    recorder.fail_commits(true);

    let result = recorder.write(Severity::Error, "lost", Vec::new());
    assert!(matches!(
        result,
        Err(ref error) if error.kind == ErrorKind::Unexpected
    ));
    assert!(recorder.records().is_empty());

    recorder.fail_commits(false);
    assert!(recorder.write(Severity::Error, "kept", Vec::new()).is_ok());
    assert_eq!(recorder.records().len(), 1);
}
