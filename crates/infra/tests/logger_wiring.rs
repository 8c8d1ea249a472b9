//! End-to-end wiring tests: config -> backend -> adapter -> sink.

use kvlog_adapters::MemoryLogSink;
use kvlog_app::LogError;
use kvlog_config::{LogFormat, LoggerConfig, LoggerEnv, apply_env_overrides};
use kvlog_domain::{Field, Level, log_args};
use kvlog_infra::{build_kv_logger_with_sink, kv_logger_from_env};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;
use std::thread;

fn config(format: LogFormat, level: Level) -> Result<kvlog_config::ValidatedLoggerConfig, Box<dyn Error>> {
    let mut config = LoggerConfig::production();
    config.format = format;
    config.level = level;
    config
        .base_fields
        .insert("service".to_string(), json!("checkout"));
    Ok(config.validate_and_normalize()?)
}

fn parse_lines(sink: &MemoryLogSink) -> Result<Vec<Value>, serde_json::Error> {
    sink.take()
        .iter()
        .map(|line| serde_json::from_str(line.trim_end()))
        .collect()
}

#[test]
fn json_config_writes_positional_calls() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = build_kv_logger_with_sink(&config(LogFormat::Json, Level::Info)?, sink.clone())?;

    logger.log(&log_args![Level::Info, "order placed", "orderId", 42, "express", true])?;

    let lines = parse_lines(&sink)?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], json!("info"));
    assert_eq!(lines[0]["message"], json!("order placed"));
    assert_eq!(
        lines[0]["fields"],
        json!({"service": "checkout", "orderId": 42, "express": true})
    );
    Ok(())
}

#[test]
fn console_config_writes_tab_separated_lines() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger =
        build_kv_logger_with_sink(&config(LogFormat::Console, Level::Debug)?, sink.clone())?;

    logger.debug("cache warm", vec![Field::new("entries", 10)])?;

    let lines = sink.take();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\tDEBUG\tcache warm\t"));
    assert!(lines[0].contains("\"entries\":10"));
    Ok(())
}

#[test]
fn configured_level_drops_quieter_calls() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = build_kv_logger_with_sink(&config(LogFormat::Json, Level::Warn)?, sink.clone())?;

    logger.log(&log_args![Level::Info, "dropped", "k", "v"])?;
    logger.log(&log_args![Level::Fatal, "kept"])?;

    let lines = parse_lines(&sink)?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], json!("fatal"));
    Ok(())
}

#[test]
fn ordinary_field_values_are_written_unchanged() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = build_kv_logger_with_sink(&config(LogFormat::Json, Level::Info)?, sink.clone())?;

    logger.log(&log_args![
        Level::Info,
        "cache miss",
        "key",
        "user:42",
        "author",
        "ada",
        "monkeyCount",
        3,
        "keyboardLayout",
        "qwerty"
    ])?;

    let lines = parse_lines(&sink)?;
    assert_eq!(
        lines[0]["fields"],
        json!({
            "service": "checkout",
            "key": "user:42",
            "author": "ada",
            "monkeyCount": 3,
            "keyboardLayout": "qwerty"
        })
    );
    Ok(())
}

#[test]
fn malformed_call_is_returned_and_self_reported() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = build_kv_logger_with_sink(&config(LogFormat::Json, Level::Info)?, sink.clone())?;

    let result = logger.log(&log_args![Level::Info, "msg", "onlykey"]);
    assert_eq!(result, Err(LogError::OddArgCount { count: 3 }));

    let lines = parse_lines(&sink)?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], json!("error"));
    assert_eq!(
        lines[0]["message"],
        json!("key value pairs should be an even number (got 3)")
    );
    assert_eq!(lines[0]["fields"]["errorCode"], json!("log:odd_arg_count"));
    assert_eq!(lines[0]["fields"]["service"], json!("checkout"));
    Ok(())
}

#[test]
fn broken_sink_surfaces_emission_failure() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    sink.fail_writes(true);
    let logger = build_kv_logger_with_sink(&config(LogFormat::Json, Level::Info)?, sink.clone())?;

    let result = logger.info("lost", Vec::new());
    assert!(matches!(
        result,
        Err(LogError::EmissionFailure { ref source })
            if source.code.to_string() == "core:sink_closed"
    ));
    assert!(sink.lines().is_empty());
    Ok(())
}

#[test]
fn derived_logger_fields_stay_out_of_the_parent() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = build_kv_logger_with_sink(&config(LogFormat::Json, Level::Info)?, sink.clone())?;
    let request = logger.with(vec![Field::new("requestId", "r-9")]);

    request.info("handled", Vec::new())?;
    logger.info("idle", Vec::new())?;

    let lines = parse_lines(&sink)?;
    assert_eq!(lines[0]["fields"]["requestId"], json!("r-9"));
    assert!(lines[1]["fields"].get("requestId").is_none());
    Ok(())
}

#[test]
fn env_overrides_reach_the_built_backend() -> Result<(), Box<dyn Error>> {
    let mut env_map = BTreeMap::new();
    env_map.insert("KVLOG_LOG_FORMAT".to_string(), "nop".to_string());
    let env = LoggerEnv::from_map(&env_map)?;
    let config = apply_env_overrides(LoggerConfig::production(), &env)?;

    let sink = Arc::new(MemoryLogSink::new());
    let logger = build_kv_logger_with_sink(&config, sink.clone())?;
    logger.error("never written", Vec::new())?;

    assert!(!logger.is_enabled(Level::Fatal));
    assert!(sink.lines().is_empty());
    Ok(())
}

#[test]
fn config_file_drives_logger_from_env() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("logger.toml");
    std::fs::write(&path, "version = 1\nformat = \"nop\"\n")?;

    let logger = kv_logger_from_env(Some(&path))?;
    assert!(!logger.is_enabled(Level::Error));
    Ok(())
}

#[test]
fn concurrent_callers_each_get_one_line() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = build_kv_logger_with_sink(&config(LogFormat::Json, Level::Info)?, sink.clone())?;

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = logger.clone();
            thread::spawn(move || {
                (0..25).try_for_each(|call| {
                    logger.log(&log_args![Level::Info, "tick", "worker", worker, "call", call])
                })
            })
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .map_err(|_| std::io::Error::other("worker panicked"))??;
    }

    let lines = parse_lines(&sink)?;
    assert_eq!(lines.len(), 200);
    assert!(lines.iter().all(|line| line["message"] == json!("tick")));
    Ok(())
}
