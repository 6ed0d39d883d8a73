//! Format-independent document model
//!
//! A [`ConfigDocument`] is built fresh for every bind call by one of the
//! format adapters, consumed by the pipeline and then dropped.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::value::Value;

/// Root keys under which document metadata may appear, in order of preference
pub const META_KEYS: [&str; 2] = ["_meta", "meta"];

/// Default prefix marking reserved (never bound) entries
pub const DEFAULT_PREFIX: &str = "_";

/// Source format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Structured document: may introduce new variables
    Json,
    /// Flat `name=value` lines: may only update existing variables
    Ini,
}

impl Format {
    /// File extension (without the dot) for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Ini => "ini",
        }
    }

    /// Pick the format from a file's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "ini" => Some(Format::Ini),
            _ => None,
        }
    }

    /// Parse document text in this format
    ///
    /// Never fails: unparseable text yields an empty document.
    pub fn parse(&self, text: &str) -> ConfigDocument {
        match self {
            Format::Json => crate::json::parse(text),
            Format::Ini => crate::ini::parse(text),
        }
    }
}

/// Document-level settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Meta {
    /// Document version, informational only
    pub version: Option<serde_json::Value>,
    /// Require `hasValue: true` on every bound entry
    pub strict: bool,
    /// Entries whose name starts with this prefix are never bound
    pub prefix: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            version: None,
            strict: false,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Explicit presence flag of an entry
///
/// The flat format has no way to express it, so its entries are always
/// [`HasValue::Unspecified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HasValue {
    /// `hasValue: true`
    Present,
    /// `hasValue: false`
    Absent,
    /// No `hasValue` given
    #[default]
    Unspecified,
}

impl From<Option<bool>> for HasValue {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => HasValue::Present,
            Some(false) => HasValue::Absent,
            None => HasValue::Unspecified,
        }
    }
}

/// One named raw configuration value plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub value: Value,
    pub has_value: HasValue,
    /// Bind verbatim, never expand
    pub literal: bool,
    /// Flat format only; `None` means comma
    pub array_delimiter: Option<String>,
}

impl Entry {
    /// Create an entry with default metadata
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            has_value: HasValue::Unspecified,
            literal: false,
            array_delimiter: None,
        }
    }

    pub fn with_has_value(mut self, has_value: HasValue) -> Self {
        self.has_value = has_value;
        self
    }

    pub fn with_literal(mut self, literal: bool) -> Self {
        self.literal = literal;
        self
    }

    pub fn with_array_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.array_delimiter = Some(delimiter.into());
        self
    }

    /// Delimiter used to split this entry into a list
    pub fn delimiter(&self) -> &str {
        match self.array_delimiter.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => ",",
        }
    }
}

/// A parsed configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub format: Format,
    pub meta: Meta,
    /// Entries in document order, keyed by case-sensitive name
    pub entries: IndexMap<String, Entry>,
}

impl ConfigDocument {
    /// Create an empty document
    pub fn new(format: Format) -> Self {
        Self {
            format,
            meta: Meta::default(),
            entries: IndexMap::new(),
        }
    }

    /// Add an entry; a later entry with the same name replaces the earlier
    /// one but keeps its position
    pub fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
