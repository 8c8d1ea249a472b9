//! Line encoders used by [`crate::SinkLogger`].

use chrono::{DateTime, SecondsFormat, Utc};
use kvlog_ports::{Field, Severity};
use kvlog_shared::redaction::{REDACTED, is_secret_key};
use serde_json::{Map, Value};

const SERIALIZE_FAILED_LINE: &str =
    "{\"timestampMs\":0,\"level\":\"error\",\"message\":\"log serialization failed\"}\n";

/// How a committed record becomes one output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEncoder {
    /// One JSON object per line.
    #[default]
    Json,
    /// Tab-separated, human-oriented line.
    Console,
}

impl LineEncoder {
    /// Encode a record, trailing newline included.
    ///
    /// Fields are redacted; a later field replaces an earlier one with the same name.
    #[must_use]
    pub fn encode(
        self,
        timestamp: DateTime<Utc>,
        severity: Severity,
        message: &str,
        fields: &[Field],
    ) -> String {
        let fields = fields_to_map(fields);
        match self {
            Self::Json => encode_json(timestamp, severity, message, fields),
            Self::Console => encode_console(timestamp, severity, message, fields),
        }
    }
}

fn encode_json(
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: &str,
    fields: Map<String, Value>,
) -> String {
    let mut payload = Map::new();
    payload.insert(
        "timestampMs".to_string(),
        Value::from(timestamp.timestamp_millis()),
    );
    payload.insert(
        "level".to_string(),
        Value::String(severity.as_str().to_string()),
    );
    payload.insert("message".to_string(), Value::String(message.to_string()));
    if !fields.is_empty() {
        payload.insert("fields".to_string(), Value::Object(fields));
    }

    serde_json::to_string(&Value::Object(payload)).map_or_else(
        |_| SERIALIZE_FAILED_LINE.to_string(),
        |mut encoded| {
            encoded.push('\n');
            encoded
        },
    )
}

fn encode_console(
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: &str,
    fields: Map<String, Value>,
) -> String {
    let mut line = format!(
        "{}\t{}\t{}",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        severity.as_str().to_ascii_uppercase(),
        escape_console(message)
    );
    if !fields.is_empty() {
        let encoded = serde_json::to_string(&Value::Object(fields))
            .unwrap_or_else(|_| "{}".to_string());
        line.push('\t');
        line.push_str(&encoded);
    }
    line.push('\n');
    line
}

// Control characters would otherwise start new lines or columns.
fn escape_console(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for ch in message.chars() {
        if ch.is_control() {
            escaped.extend(ch.escape_default());
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

pub(crate) fn fields_to_map(fields: &[Field]) -> Map<String, Value> {
    let mut map = Map::new();
    for field in fields {
        let value = if is_secret_key(field.name()) {
            Value::String(REDACTED.to_string())
        } else {
            let mut value = field.value().clone();
            redact_value(&mut value);
            value
        };
        map.insert(field.name().to_string(), value);
    }
    map
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                if is_secret_key(key) {
                    *nested = Value::String(REDACTED.to_string());
                } else {
                    redact_value(nested);
                }
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}
