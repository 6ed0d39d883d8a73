//! confbind-core: Bind configuration files onto caller-declared variables
//!
//! A configuration document (JSON or INI) is turned into named entries,
//! filtered, expanded and written into a [`VariableScope`] owned by the
//! caller. Names the caller already supplied are never overwritten.
//!
//! # Example
//!
//! ```rust
//! use confbind_core::{Binder, BoundParameters, Format, MapScope, Variable, VariableScope};
//!
//! let json = r#"{
//!     "_meta": { "version": 1 },
//!     "Root":  { "value": "/opt/app" },
//!     "Bin":   { "value": "$Root/bin" },
//!     "Force": { "value": false, "hasValue": true }
//! }"#;
//!
//! let mut scope = MapScope::new();
//! let report = Binder::new()
//!     .bind_str(json, Format::Json, &BoundParameters::new(), &mut scope)
//!     .unwrap();
//!
//! assert_eq!(report.count(), 3);
//! assert_eq!(scope.get("Bin"), Some(&Variable::from("/opt/app/bin")));
//! assert_eq!(scope.get("Force"), Some(&Variable::Bool(false)));
//! ```

pub mod coerce;
pub mod document;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod ini;
pub mod json;
pub mod scope;
pub mod value;

mod binder;

pub use binder::{BindOptions, BindReport, Binder, FileSpec, SkipReason};
pub use document::{ConfigDocument, Entry, Format, HasValue, Meta};
pub use error::{Error, ErrorKind, Result};
pub use expansion::Expansion;
pub use filter::{BoundParameters, Exclusion};
pub use scope::{MapScope, ScalarType, TargetKind, Variable, VariableScope};
pub use value::Value;
