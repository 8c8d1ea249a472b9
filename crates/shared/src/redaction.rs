//! Secret detection and redaction utilities.
//!
//! Field names attached to log records and env variable names in config
//! errors both go through [`is_secret_key`] so secrets never reach output.
//!
//! Names are split into lower-case segments on `_`, `-`, `.`, spaces and
//! camelCase boundaries, and only whole segments are compared. `key` or
//! `author` on their own are ordinary field names.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Segments that mark a secret wherever they appear.
const SECRET_SEGMENTS: [&str; 12] = [
    "apikey",
    "auth",
    "authorization",
    "cookie",
    "credential",
    "credentials",
    "passwd",
    "password",
    "privatekey",
    "secret",
    "token",
    "tokens",
];

/// Segments that turn a directly following `key` segment into a secret.
const KEY_QUALIFIERS: [&str; 7] = [
    "access",
    "api",
    "encryption",
    "master",
    "private",
    "secret",
    "signing",
];

/// Checks if a key/variable name likely refers to a secret.
///
/// Matching is case-insensitive and works on whole name segments.
///
/// # Examples
///
/// ```
/// use kvlog_shared::is_secret_key;
///
/// assert!(is_secret_key("apiKey"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("Set-Cookie"));
/// assert!(!is_secret_key("requestId"));
/// assert!(!is_secret_key("key"));
/// assert!(!is_secret_key("author"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let segments = name_segments(key);
    segments
        .iter()
        .any(|segment| SECRET_SEGMENTS.contains(&segment.as_str()))
        || segments.windows(2).any(|pair| match pair {
            [qualifier, noun] => {
                (noun == "key" || noun == "keys") && KEY_QUALIFIERS.contains(&qualifier.as_str())
            },
            _ => false,
        })
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use kvlog_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("DB_PASSWORD", "hunter2"), "[REDACTED]");
/// assert_eq!(redact_if_secret("KVLOG_LOG_LEVEL", "debug"), "debug");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

fn name_segments(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();

    for (index, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            flush_segment(&mut segments, &mut current);
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let previous = index.checked_sub(1).and_then(|at| chars.get(at));
            let next = chars.get(index + 1);
            let after_lower = previous.is_some_and(|prev| prev.is_lowercase() || prev.is_numeric());
            // "APIKey" splits before the `K`.
            let acronym_end = previous.is_some_and(|prev| prev.is_uppercase())
                && next.is_some_and(|next| next.is_lowercase());
            if after_lower || acronym_end {
                flush_segment(&mut segments, &mut current);
            }
        }
        current.extend(ch.to_lowercase());
    }
    flush_segment(&mut segments, &mut current);

    segments
}

fn flush_segment(segments: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}
