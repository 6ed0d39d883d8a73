//! Placeholder expansion
//!
//! Two placeholder styles are recognized:
//! - `%NAME%` - environment variable
//! - `$name` or `${name}` - variable already bound in the caller's scope
//!
//! A value uses exactly one style. When both marker characters occur, only
//! environment expansion runs and any `$` text stays as written; mixing the
//! two in one value is not supported.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::value::Value;

/// Marker character for environment placeholders
pub const ENV_MARKER: char = '%';

/// Marker character for scope variable placeholders
pub const PROCESS_MARKER: char = '$';

/// Constant tokens that contain a marker but are never expanded
pub const RESERVED_TOKENS: [&str; 3] = ["$true", "$false", "$null"];

/// Which expansion, if any, a value needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Bind as-is
    None,
    /// Substitute `%NAME%` from the environment
    Environment,
    /// Substitute `$name` from the caller's scope
    Process,
}

impl Expansion {
    /// Decide how a value must be expanded
    ///
    /// Only non-literal strings are ever expanded.
    pub fn of(value: &Value, literal: bool) -> Self {
        match value {
            Value::String(s) if !literal => Self::of_text(s),
            _ => Expansion::None,
        }
    }

    fn of_text(text: &str) -> Self {
        if RESERVED_TOKENS.contains(&text) {
            Expansion::None
        } else if text.contains(ENV_MARKER) {
            Expansion::Environment
        } else if text.contains(PROCESS_MARKER) {
            Expansion::Process
        } else {
            Expansion::None
        }
    }

    pub fn is_needed(&self) -> bool {
        !matches!(self, Expansion::None)
    }
}

/// Replace `%NAME%` placeholders using `lookup`
///
/// A placeholder whose name is empty or unknown is left untouched, and
/// scanning resumes at its closing `%`.
pub fn expand_environment<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(ENV_MARKER) {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find(ENV_MARKER) else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let name = &after[..end];
        let resolved = if name.is_empty() { None } else { lookup(name) };
        match resolved {
            Some(value) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push(ENV_MARKER);
                out.push_str(name);
                rest = &after[end..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn process_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z0-9_]+)").expect("placeholder pattern is valid")
    })
}

/// Replace `$name` and `${name}` placeholders using `lookup`
///
/// Unknown names expand to nothing. A `$` not followed by a name is kept.
pub fn expand_process<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    process_pattern()
        .replace_all(input, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            lookup(name).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_classify_plain_and_literal() {
        assert_eq!(Expansion::of(&Value::from("plain"), false), Expansion::None);
        assert_eq!(Expansion::of(&Value::from("100%"), true), Expansion::None);
        assert_eq!(Expansion::of(&Value::from("$home"), true), Expansion::None);
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(
            Expansion::of(&Value::from("%TEMP%\\x"), false),
            Expansion::Environment
        );
        assert_eq!(
            Expansion::of(&Value::from("$root/bin"), false),
            Expansion::Process
        );
        // Environment marker takes precedence
        assert_eq!(
            Expansion::of(&Value::from("%HOME%/$sub"), false),
            Expansion::Environment
        );
    }

    #[test]
    fn test_classify_reserved_tokens() {
        for token in RESERVED_TOKENS {
            assert_eq!(Expansion::of(&Value::from(token), false), Expansion::None);
        }
        // Only the exact tokens are reserved
        assert_eq!(
            Expansion::of(&Value::from("$trueish"), false),
            Expansion::Process
        );
    }

    #[test]
    fn test_classify_non_strings() {
        assert_eq!(Expansion::of(&Value::Null, false), Expansion::None);
        assert_eq!(Expansion::of(&Value::Bool(true), false), Expansion::None);
        assert_eq!(
            Expansion::of(&Value::List(vec!["%X%".into()]), false),
            Expansion::None
        );
        assert!(!Expansion::None.is_needed());
        assert!(Expansion::Process.is_needed());
    }

    #[test]
    fn test_expand_environment() {
        let vars = env(&[("TEMP", "/tmp"), ("USER", "ada")]);
        let lookup = |name: &str| vars.get(name).cloned();

        assert_eq!(
            expand_environment("%TEMP%/%USER%.log", lookup),
            "/tmp/ada.log"
        );
    }

    #[test]
    fn test_expand_environment_unknown_and_unbalanced() {
        let vars = env(&[("B", "x")]);
        let lookup = |name: &str| vars.get(name).cloned();

        assert_eq!(expand_environment("100%", lookup), "100%");
        assert_eq!(expand_environment("%MISSING%", lookup), "%MISSING%");
        assert_eq!(expand_environment("%%", lookup), "%%");
        assert_eq!(expand_environment("%A%%B%", lookup), "%A%x");
        assert_eq!(expand_environment("50% of %B%", lookup), "50% of x");
    }

    #[test]
    fn test_expand_environment_is_repeatable() {
        let vars = env(&[("ROOT", "/srv")]);
        let lookup = |name: &str| vars.get(name).cloned();
        let input = "%ROOT%/data/%ROOT%";

        let first = expand_environment(input, lookup);
        let second = expand_environment(input, lookup);
        assert_eq!(first, "/srv/data//srv");
        assert_eq!(first, second);
    }

    #[test]
    fn test_expand_environment_leaves_process_markers() {
        let vars = env(&[("HOME", "/home/ada")]);
        let lookup = |name: &str| vars.get(name).cloned();

        assert_eq!(
            expand_environment("%HOME%/$sub", lookup),
            "/home/ada/$sub"
        );
    }

    #[test]
    fn test_expand_process() {
        let vars = env(&[("root", "/opt/app"), ("ver", "2")]);
        let lookup = |name: &str| vars.get(name).cloned();

        assert_eq!(expand_process("$root/bin", lookup), "/opt/app/bin");
        assert_eq!(expand_process("v${ver}.0", lookup), "v2.0");
        assert_eq!(expand_process("$missing/x", lookup), "/x");
        assert_eq!(expand_process("cost: $ 5", lookup), "cost: $ 5");
        assert_eq!(expand_process("${}", lookup), "${}");
    }
}
