//! Inclusion and precedence filtering
//!
//! Decides, per entry, whether it takes part in binding at all. This is the
//! only place where the raw value's truthiness matters.

use std::collections::HashSet;
use std::fmt;

use crate::document::{Entry, HasValue, Meta};

/// Why an entry was left out by the inclusion filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Name starts with the document prefix
    Reserved,
    /// `hasValue` is explicitly false
    ExplicitlyAbsent,
    /// Strict document and no `hasValue: true`
    StrictUnspecified,
    /// No `hasValue` and the value looks absent
    FalsyValue,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Reserved => write!(f, "reserved prefix"),
            Exclusion::ExplicitlyAbsent => write!(f, "hasValue is false"),
            Exclusion::StrictUnspecified => write!(f, "strict mode requires hasValue"),
            Exclusion::FalsyValue => write!(f, "empty value without hasValue"),
        }
    }
}

/// Apply the inclusion rules in order, stopping at the first that excludes
///
/// An empty prefix reserves nothing.
pub fn check_inclusion(entry: &Entry, meta: &Meta) -> Result<(), Exclusion> {
    if !meta.prefix.is_empty() && entry.name.starts_with(&meta.prefix) {
        return Err(Exclusion::Reserved);
    }

    match entry.has_value {
        HasValue::Absent => Err(Exclusion::ExplicitlyAbsent),
        HasValue::Present => Ok(()),
        HasValue::Unspecified if meta.strict => Err(Exclusion::StrictUnspecified),
        HasValue::Unspecified if entry.value.is_falsy() => Err(Exclusion::FalsyValue),
        HasValue::Unspecified => Ok(()),
    }
}

/// Names the caller already supplied (e.g. on the command line)
///
/// Entries with these names are never bound: explicit arguments always win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundParameters {
    names: HashSet<String>,
}

impl BoundParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a caller-supplied name
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for BoundParameters {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
