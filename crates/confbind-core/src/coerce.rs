//! Type coercion for flat-format bindings
//!
//! The target's [`TargetKind`] is decided once from its current value; the
//! conversion is then picked by that kind alone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::scope::{ScalarType, TargetKind, Variable};

/// Text that binds a boolean target to `false` (compared case-sensitively)
pub const FALSE_TOKENS: [&str; 4] = ["", "0", "false", "$false"];

/// Accepted timestamp layouts besides RFC 3339
const TIMESTAMP_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Convert resolved text into a value of the target's kind
///
/// `delimiter` is only used for array targets.
pub fn coerce(name: &str, text: &str, kind: TargetKind, delimiter: &str) -> Result<Variable> {
    match kind {
        TargetKind::Array => Ok(to_list(text, delimiter)),
        TargetKind::Boolean => Ok(Variable::Bool(to_flag(text))),
        TargetKind::Scalar(scalar) => to_scalar(name, text, scalar),
    }
}

fn to_list(text: &str, delimiter: &str) -> Variable {
    Variable::List(text.split(delimiter).map(str::to_string).collect())
}

fn to_flag(text: &str) -> bool {
    !FALSE_TOKENS.contains(&text)
}

fn to_scalar(name: &str, text: &str, scalar: ScalarType) -> Result<Variable> {
    let fail = || Error::type_coercion(name, scalar.to_string(), text);

    match scalar {
        ScalarType::Text | ScalarType::Untyped => Ok(Variable::String(text.to_string())),
        ScalarType::Integer => text
            .trim()
            .parse()
            .map(Variable::Integer)
            .map_err(|_| fail()),
        ScalarType::Float => text
            .trim()
            .parse()
            .map(Variable::Float)
            .map_err(|_| fail()),
        ScalarType::Timestamp => parse_timestamp(text.trim())
            .map(Variable::Timestamp)
            .ok_or_else(fail),
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
