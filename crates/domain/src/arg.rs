//! Positional arguments of the key/value call shape.
//!
//! A key/value call is `[level, message, key1, value1, key2, value2, ...]`.
//! Each slot is a [`LogArg`]: either a [`Level`] tag or an arbitrary JSON
//! value. Which variant is acceptable in which slot is decided by the adapter.

use crate::Level;
use serde_json::Value;

/// One positional argument of a key/value log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogArg {
    /// A level tag.
    Level(Level),
    /// Any other value.
    Value(Value),
}

impl LogArg {
    /// Returns the level tag when this argument is one.
    #[must_use]
    pub const fn as_level(&self) -> Option<Level> {
        match self {
            Self::Level(level) => Some(*level),
            Self::Value(_) => None,
        }
    }

    /// Returns the text when this argument is a JSON string.
    ///
    /// A level tag is not text, even though it has a name.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Value(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Render the argument as message text.
    ///
    /// Strings render verbatim, level tags by name, everything else as JSON.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Level(level) => level.as_str().to_owned(),
            Self::Value(Value::String(text)) => text.clone(),
            Self::Value(value) => value.to_string(),
        }
    }

    /// Convert into a field value. Level tags become their name.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Level(level) => Value::String(level.as_str().to_owned()),
            Self::Value(value) => value.clone(),
        }
    }

    /// Short name of the argument's type, used in validation errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Level(_) => "level",
            Self::Value(Value::Null) => "null",
            Self::Value(Value::Bool(_)) => "bool",
            Self::Value(Value::Number(_)) => "number",
            Self::Value(Value::String(_)) => "string",
            Self::Value(Value::Array(_)) => "array",
            Self::Value(Value::Object(_)) => "object",
        }
    }
}

impl From<Level> for LogArg {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for LogArg
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Value(Value::Null), Into::into)
    }
}

macro_rules! impl_from_json {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for LogArg {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )+
    };
}

impl_from_json!(
    &str, String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);

/// Build a `Vec<LogArg>` from heterogeneous values.
///
/// ```
/// use kvlog_domain::{Level, LogArg, log_args};
///
/// let args = log_args![Level::Info, "request served", "status", 200];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[0], LogArg::Level(Level::Info));
/// ```
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::<$crate::LogArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogArg::from($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_formats_any_value_as_text() {
        assert_eq!(LogArg::from("plain").render(), "plain");
        assert_eq!(LogArg::from(42).render(), "42");
        assert_eq!(LogArg::from(1.5).render(), "1.5");
        assert_eq!(LogArg::from(false).render(), "false");
        assert_eq!(LogArg::from(None::<&str>).render(), "null");
        assert_eq!(LogArg::from(json!({"a": 1})).render(), "{\"a\":1}");
        assert_eq!(LogArg::from(Level::Warn).render(), "WARN");
    }

    #[test]
    fn only_json_strings_are_keys() {
        assert_eq!(LogArg::from("key").as_key(), Some("key"));
        assert_eq!(LogArg::from(7).as_key(), None);
        assert_eq!(LogArg::from(Level::Info).as_key(), None);
    }

    #[test]
    fn level_tags_become_names_in_value_position() {
        assert_eq!(LogArg::from(Level::Fatal).to_value(), json!("FATAL"));
        assert_eq!(LogArg::from(Some(3_u8)).to_value(), json!(3));
    }

    #[test]
    fn type_names_describe_json_kinds() {
        assert_eq!(LogArg::from(Level::Info).type_name(), "level");
        assert_eq!(LogArg::from("INFO").type_name(), "string");
        assert_eq!(LogArg::from(1_u64).type_name(), "number");
        assert_eq!(LogArg::from(json!([1])).type_name(), "array");
        assert_eq!(LogArg::from(Value::Null).type_name(), "null");
    }

    #[test]
    fn macro_builds_args_in_order() {
        let args = crate::log_args![Level::Debug, "msg", "k", true];
        assert_eq!(
            args,
            vec![
                LogArg::Level(Level::Debug),
                LogArg::Value(json!("msg")),
                LogArg::Value(json!("k")),
                LogArg::Value(json!(true)),
            ]
        );
        assert!(crate::log_args![].is_empty());
    }
}
