//! Caller-owned target variables
//!
//! The binder never owns variables. It reads a slot's current value to learn
//! its type, writes the new value back, and looks names up for `$name`
//! expansion, all through [`VariableScope`].

use std::fmt;

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::value::Value;

/// Display format for timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The value held by a caller's variable slot
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(NaiveDateTime),
    List(Vec<String>),
}

impl Variable {
    /// Get as boolean if this is a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variable::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Variable::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as str if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variable::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as slice if this is a List
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Variable::List(l) => Some(l),
            _ => None,
        }
    }

    /// The coercion target this slot's current value implies
    pub fn kind(&self) -> TargetKind {
        match self {
            Variable::List(_) => TargetKind::Array,
            Variable::Bool(_) => TargetKind::Boolean,
            Variable::Integer(_) => TargetKind::Scalar(ScalarType::Integer),
            Variable::Float(_) => TargetKind::Scalar(ScalarType::Float),
            Variable::String(_) => TargetKind::Scalar(ScalarType::Text),
            Variable::Timestamp(_) => TargetKind::Scalar(ScalarType::Timestamp),
            Variable::Null => TargetKind::Scalar(ScalarType::Untyped),
        }
    }
}

/// Lists render space-separated, null renders empty
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Null => Ok(()),
            Variable::Bool(b) => write!(f, "{}", b),
            Variable::Integer(i) => write!(f, "{}", i),
            Variable::Float(n) => write!(f, "{}", n),
            Variable::String(s) => write!(f, "{}", s),
            Variable::Timestamp(t) => write!(f, "{}", t.format(TIMESTAMP_FORMAT)),
            Variable::List(items) => write!(f, "{}", items.join(" ")),
        }
    }
}

impl From<Value> for Variable {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Variable::Null,
            Value::Bool(b) => Variable::Bool(b),
            Value::Integer(i) => Variable::Integer(i),
            Value::Float(f) => Variable::Float(f),
            Value::String(s) => Variable::String(s),
            Value::List(l) => Variable::List(l),
        }
    }
}

impl From<bool> for Variable {
    fn from(b: bool) -> Self {
        Variable::Bool(b)
    }
}

impl From<i64> for Variable {
    fn from(i: i64) -> Self {
        Variable::Integer(i)
    }
}

impl From<f64> for Variable {
    fn from(f: f64) -> Self {
        Variable::Float(f)
    }
}

impl From<&str> for Variable {
    fn from(s: &str) -> Self {
        Variable::String(s.to_string())
    }
}

impl From<String> for Variable {
    fn from(s: String) -> Self {
        Variable::String(s)
    }
}

impl From<NaiveDateTime> for Variable {
    fn from(t: NaiveDateTime) -> Self {
        Variable::Timestamp(t)
    }
}

impl From<Vec<String>> for Variable {
    fn from(l: Vec<String>) -> Self {
        Variable::List(l)
    }
}

impl From<Vec<&str>> for Variable {
    fn from(l: Vec<&str>) -> Self {
        Variable::List(l.into_iter().map(str::to_string).collect())
    }
}

/// Declared type of an existing target, decided once before coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// List of strings: split on the entry's delimiter
    Array,
    /// Flag: true unless the text is a false token
    Boolean,
    /// Anything else: convert to the given scalar type
    Scalar(ScalarType),
}

/// Scalar conversion targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Text,
    Integer,
    Float,
    Timestamp,
    /// The slot holds null, so there is no type to convert to
    Untyped,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Text => write!(f, "string"),
            ScalarType::Integer => write!(f, "integer"),
            ScalarType::Float => write!(f, "float"),
            ScalarType::Timestamp => write!(f, "timestamp"),
            ScalarType::Untyped => write!(f, "untyped"),
        }
    }
}

/// Read/write access to the caller's named variables
pub trait VariableScope {
    /// Current value of a variable, `None` if it does not exist
    fn get(&self, name: &str) -> Option<&Variable>;

    /// Create or overwrite a variable
    fn set(&mut self, name: &str, value: Variable);

    /// Type of an existing variable
    fn target_kind(&self, name: &str) -> Option<TargetKind> {
        self.get(name).map(Variable::kind)
    }

    /// Text of a variable for `$name` expansion
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

/// An insertion-ordered in-memory scope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapScope {
    vars: IndexMap<String, Variable>,
}

impl MapScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable with its initial value (builder style)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Variable>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.vars.iter()
    }
}

impl VariableScope for MapScope {
    fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    fn set(&mut self, name: &str, value: Variable) {
        self.vars.insert(name.to_string(), value);
    }
}
