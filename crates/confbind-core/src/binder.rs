//! The binding pipeline
//!
//! Document → inclusion filter → precedence filter → two-pass expansion →
//! coercion and assignment into the caller's scope.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use crate::coerce;
use crate::document::{ConfigDocument, Entry, Format};
use crate::error::{Error, Result};
use crate::expansion::{self, Expansion};
use crate::filter::{self, BoundParameters, Exclusion};
use crate::scope::{TargetKind, Variable, VariableScope};
use crate::value::Value;

/// Options for a [`Binder`]
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// Fixed environment for `%NAME%` expansion; `None` reads the process
    /// environment
    pub environment: Option<HashMap<String, String>>,
}

/// The configuration file to bind from
///
/// # Examples
///
/// ```rust
/// use confbind_core::{FileSpec, Format};
///
/// // Explicitly requested: an error if missing
/// let spec = FileSpec::required("/etc/deploy/settings.ini");
///
/// // Next to the script: silently skipped if missing
/// let spec = FileSpec::default_for("/opt/tools/deploy.sh", Format::Json);
/// assert_eq!(spec.path().to_str(), Some("/opt/tools/deploy.sh.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSpec {
    /// Explicitly specified file - error if not found
    Required(PathBuf),
    /// Default location - treated as "no configuration" if not found
    Optional(PathBuf),
}

impl FileSpec {
    /// Create a required file spec
    pub fn required(path: impl Into<PathBuf>) -> Self {
        FileSpec::Required(path.into())
    }

    /// Create an optional file spec
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        FileSpec::Optional(path.into())
    }

    /// Default config location for a script: its path plus the format
    /// extension
    pub fn default_for(script: impl AsRef<Path>, format: Format) -> Self {
        let mut path = OsString::from(script.as_ref().as_os_str());
        path.push(".");
        path.push(format.extension());
        FileSpec::Optional(PathBuf::from(path))
    }

    /// Get the path for this file spec
    pub fn path(&self) -> &Path {
        match self {
            FileSpec::Required(p) => p,
            FileSpec::Optional(p) => p,
        }
    }

    /// Check if this file spec is optional
    pub fn is_optional(&self) -> bool {
        matches!(self, FileSpec::Optional(_))
    }

    /// Format implied by the file extension
    pub fn format(&self) -> Result<Format> {
        Format::from_path(self.path())
            .ok_or_else(|| Error::unsupported_format(self.path().display().to_string()))
    }
}

impl From<PathBuf> for FileSpec {
    fn from(path: PathBuf) -> Self {
        FileSpec::Required(path)
    }
}

impl From<&str> for FileSpec {
    fn from(path: &str) -> Self {
        FileSpec::Required(PathBuf::from(path))
    }
}

/// Why an entry did not bind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Left out by the inclusion rules
    Excluded(Exclusion),
    /// The caller supplied this name explicitly
    BoundByCaller,
    /// Flat format only: no such variable in the caller's scope
    UnknownTarget,
}

/// Outcome of a bind call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Names bound, in bind order
    pub bound: Vec<String>,
    /// Names skipped, with the reason, in processing order
    pub skipped: Vec<(String, SkipReason)>,
}

impl BindReport {
    /// Number of variables bound
    pub fn count(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Whether `name` was bound
    pub fn contains(&self, name: &str) -> bool {
        self.bound.iter().any(|n| n == name)
    }

    /// Skip reason recorded for `name`, if it was skipped
    pub fn skip_reason(&self, name: &str) -> Option<SkipReason> {
        self.skipped
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, reason)| *reason)
    }

    fn skip(&mut self, name: String, reason: SkipReason) {
        log::trace!("Skipping '{}': {:?}", name, reason);
        self.skipped.push((name, reason));
    }
}

/// Binds configuration documents onto a caller's variables
#[derive(Debug, Clone, Default)]
pub struct Binder {
    options: BindOptions,
}

impl Binder {
    /// Create a binder that reads the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binder with custom options
    pub fn with_options(options: BindOptions) -> Self {
        Self { options }
    }

    /// Load a configuration file and bind it
    ///
    /// Fails only when a required file is missing, the extension names no
    /// known format, or a flat-format value cannot be coerced. A missing
    /// optional file, an unreadable file or an unparseable document binds
    /// nothing.
    pub fn bind_file(
        &self,
        spec: &FileSpec,
        bound: &BoundParameters,
        scope: &mut dyn VariableScope,
    ) -> Result<BindReport> {
        let format = spec.format()?;
        let path = spec.path();

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                if spec.is_optional() {
                    log::debug!("No configuration at {}", path.display());
                    return Ok(BindReport::default());
                }
                return Err(Error::config_not_found(path.display().to_string()));
            }
            Err(e) => {
                log::warn!("{}", Error::io(path.display().to_string(), &e));
                return Ok(BindReport::default());
            }
        };

        let doc = format.parse(&text);
        self.run(doc, &path.display().to_string(), bound, scope)
    }

    /// Parse document text and bind it
    pub fn bind_str(
        &self,
        text: &str,
        format: Format,
        bound: &BoundParameters,
        scope: &mut dyn VariableScope,
    ) -> Result<BindReport> {
        self.run(format.parse(text), "<string>", bound, scope)
    }

    /// Bind an already-built document
    pub fn bind_document(
        &self,
        doc: ConfigDocument,
        bound: &BoundParameters,
        scope: &mut dyn VariableScope,
    ) -> Result<BindReport> {
        self.run(doc, "<document>", bound, scope)
    }

    fn run(
        &self,
        doc: ConfigDocument,
        source: &str,
        bound: &BoundParameters,
        scope: &mut dyn VariableScope,
    ) -> Result<BindReport> {
        let ConfigDocument {
            format,
            meta,
            entries,
        } = doc;
        let mut report = BindReport::default();

        let mut plain = Vec::new();
        let mut expandable = Vec::new();
        for entry in entries.into_values() {
            if let Err(why) = filter::check_inclusion(&entry, &meta) {
                report.skip(entry.name, SkipReason::Excluded(why));
                continue;
            }
            if bound.contains(&entry.name) {
                report.skip(entry.name, SkipReason::BoundByCaller);
                continue;
            }

            match Expansion::of(&entry.value, entry.literal) {
                Expansion::None => plain.push(entry),
                kind => expandable.push((entry, kind)),
            }
        }

        // Pass 1 binds everything that needs no expansion, so that pass 2
        // can refer to it through the scope.
        for entry in plain {
            let value = entry.value.clone();
            self.bind_entry(format, &entry, value, source, scope, &mut report)?;
        }

        // Pass 2. Expanded entries may not refer to each other.
        for (entry, kind) in expandable {
            let value = Value::String(self.expand(&entry, kind, scope));
            self.bind_entry(format, &entry, value, source, scope, &mut report)?;
        }

        Ok(report)
    }

    fn expand(&self, entry: &Entry, kind: Expansion, scope: &dyn VariableScope) -> String {
        let text = entry.value.as_str().unwrap_or_default();
        match kind {
            Expansion::Environment => expansion::expand_environment(text, |name| self.env_var(name)),
            Expansion::Process => expansion::expand_process(text, |name| scope.lookup(name)),
            Expansion::None => text.to_string(),
        }
    }

    fn env_var(&self, name: &str) -> Option<String> {
        match &self.options.environment {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    fn bind_entry(
        &self,
        format: Format,
        entry: &Entry,
        value: Value,
        source: &str,
        scope: &mut dyn VariableScope,
        report: &mut BindReport,
    ) -> Result<()> {
        let variable = match format {
            // Structured documents create or overwrite unconditionally
            Format::Json => Variable::from(value),
            Format::Ini => {
                let Some(kind) = scope.target_kind(&entry.name) else {
                    report.skip(entry.name.clone(), SkipReason::UnknownTarget);
                    return Ok(());
                };
                match (kind, value) {
                    (TargetKind::Array, Value::List(items)) => Variable::List(items),
                    (kind, value) => {
                        let text = value.into_text(entry.delimiter());
                        coerce::coerce(&entry.name, &text, kind, entry.delimiter())?
                    }
                }
            }
        };

        if report.is_empty() {
            log::debug!("Binding variables from {}", source);
        }
        log::debug!("  {} = {:?}", entry.name, variable);

        scope.set(&entry.name, variable);
        report.bound.push(entry.name.clone());
        Ok(())
    }
}
