//! Named structured fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Field name carrying the failure text on self-reported adapter errors.
pub const ERROR_FIELD: &str = "error";

/// Ordered list of fields, in attachment order.
pub type Fields = Vec<Field>;

/// A named value attached to a log record.
///
/// The value is kept as JSON; rendering it is the backend's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: Box<str>,
    /// Field value.
    pub value: Value,
}

impl Field {
    /// Build a field from any JSON-convertible value.
    pub fn new(name: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build a string field from a value's `Display` rendering.
    pub fn display(name: impl Into<Box<str>>, value: &impl fmt::Display) -> Self {
        Self::new(name, value.to_string())
    }

    /// Build the conventional `error` field.
    pub fn error(error: &(dyn std::error::Error + '_)) -> Self {
        Self::new(ERROR_FIELD, error.to_string())
    }

    /// Borrow the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the field value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

impl<N, V> From<(N, V)> for Field
where
    N: Into<Box<str>>,
    V: Into<Value>,
{
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}
