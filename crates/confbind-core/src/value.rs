//! Raw configuration values
//!
//! Represents an entry's value as produced by a format adapter, before any
//! expansion or coercion. Only scalars, booleans, null and one-dimensional
//! string lists are representable.

/// A raw configuration value that may still contain placeholders
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value (also used when an entry carries no value at all)
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value (may contain `%NAME%` or `$name` placeholders)
    String(String),
    /// List of strings
    List(Vec<String>),
}

impl Value {
    /// Get as str if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value "looks absent".
    ///
    /// Empty strings, null, `false` and numeric zero are falsy. Lists are
    /// never falsy, not even when empty.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Integer(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::List(_) => false,
        }
    }

    /// Text form used on the flat-format path
    ///
    /// Null becomes the empty string and list items are joined with
    /// `delimiter`.
    pub fn into_text(self, delimiter: &str) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s,
            Value::List(items) => items.join(delimiter),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::List(v)
    }
}
