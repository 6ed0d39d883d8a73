//! Structured-document adapter
//!
//! Each top-level property is one entry:
//!
//! ```json
//! {
//!   "_meta": { "version": 1, "strict": false, "prefix": "_" },
//!   "LogPath": { "value": "%TEMP%\\app.log" },
//!   "Banner":  { "value": "100%", "literal": true },
//!   "Retries": { "value": 0, "hasValue": true }
//! }
//! ```
//!
//! Anything that does not parse to a JSON object becomes an empty document.

use serde_json::{Map, Value as JsonValue};

use crate::document::{ConfigDocument, Entry, Format, HasValue, Meta, META_KEYS};
use crate::error::{Error, Result};
use crate::value::Value;

/// Parse JSON text into a document, soft-failing to an empty one
pub fn parse(text: &str) -> ConfigDocument {
    match try_parse(text) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Ignoring unparseable JSON configuration: {}", e);
            ConfigDocument::new(Format::Json)
        }
    }
}

/// Parse JSON text into a document, reporting malformed input
pub fn try_parse(text: &str) -> Result<ConfigDocument> {
    if text.trim().is_empty() {
        return Err(Error::parse("empty document"));
    }

    let root = match serde_json::from_str(text).map_err(|e| Error::parse(e.to_string()))? {
        JsonValue::Object(map) => map,
        other => {
            return Err(Error::parse(format!(
                "expected an object at the document root, got {}",
                json_type_name(&other)
            )))
        }
    };

    let mut doc = ConfigDocument::new(Format::Json);
    doc.meta = read_meta(&root);

    for (name, property) in &root {
        if META_KEYS.contains(&name.as_str()) {
            continue;
        }
        doc.insert(read_entry(name, property));
    }

    Ok(doc)
}

/// Read metadata from the first recognized meta key that is present
fn read_meta(root: &Map<String, JsonValue>) -> Meta {
    let Some(raw) = META_KEYS.iter().find_map(|key| root.get(*key)) else {
        return Meta::default();
    };

    match serde_json::from_value::<Meta>(raw.clone()) {
        Ok(meta) => meta,
        Err(e) => {
            log::warn!("Ignoring malformed meta entry: {}", e);
            Meta::default()
        }
    }
}

fn read_entry(name: &str, property: &JsonValue) -> Entry {
    let Some(obj) = property.as_object() else {
        return Entry::new(name, Value::Null);
    };

    let value = obj.get("value").map(to_value).unwrap_or_default();
    let has_value = HasValue::from(obj.get("hasValue").and_then(JsonValue::as_bool));
    let literal = obj
        .get("literal")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);

    Entry::new(name, value)
        .with_has_value(has_value)
        .with_literal(literal)
}

fn to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or_default()),
        },
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::List(items.iter().map(to_text).collect()),
        // Nested structures are out of scope; keep their JSON text
        JsonValue::Object(_) => Value::String(json.to_string()),
    }
}

/// Render a list element as text
fn to_text(json: &JsonValue) -> String {
    match json {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_type_name(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_entries_in_document_order() {
        let doc = parse(
            r#"{
                "Zeta": { "value": "z" },
                "Alpha": { "value": "a" },
                "Mid": { "value": "m" }
            }"#,
        );

        let names: Vec<&str> = doc.entries.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(doc.format, Format::Json);
    }

    #[test]
    fn test_parse_entry_flags() {
        let doc = parse(
            r#"{
                "A": { "value": "x", "hasValue": true, "literal": true },
                "B": { "value": "y", "hasValue": false },
                "C": { "value": "z" }
            }"#,
        );

        let a = doc.get("A").unwrap();
        assert_eq!(a.has_value, HasValue::Present);
        assert!(a.literal);

        let b = doc.get("B").unwrap();
        assert_eq!(b.has_value, HasValue::Absent);
        assert!(!b.literal);

        let c = doc.get("C").unwrap();
        assert_eq!(c.has_value, HasValue::Unspecified);
        assert_eq!(c.array_delimiter, None);
    }

    #[test]
    fn test_parse_value_types() {
        let doc = parse(
            r#"{
                "S": { "value": "text" },
                "B": { "value": false },
                "N": { "value": null },
                "I": { "value": 42 },
                "F": { "value": 2.5 },
                "L": { "value": ["a", 1, true] },
                "M": { "hasValue": true }
            }"#,
        );

        assert_eq!(doc.get("S").unwrap().value, Value::from("text"));
        assert_eq!(doc.get("B").unwrap().value, Value::Bool(false));
        assert_eq!(doc.get("N").unwrap().value, Value::Null);
        assert_eq!(doc.get("I").unwrap().value, Value::Integer(42));
        assert_eq!(doc.get("F").unwrap().value, Value::Float(2.5));
        assert_eq!(
            doc.get("L").unwrap().value,
            Value::List(vec!["a".into(), "1".into(), "true".into()])
        );
        assert_eq!(doc.get("M").unwrap().value, Value::Null);
    }

    #[test]
    fn test_non_object_property_has_no_value() {
        let doc = parse(r#"{ "Bare": "hello" }"#);
        let entry = doc.get("Bare").unwrap();
        assert_eq!(entry.value, Value::Null);
        assert_eq!(entry.has_value, HasValue::Unspecified);
    }

    #[test]
    fn test_non_boolean_flags_are_ignored() {
        let doc = parse(r#"{ "A": { "value": "x", "hasValue": "yes", "literal": 1 } }"#);
        let entry = doc.get("A").unwrap();
        assert_eq!(entry.has_value, HasValue::Unspecified);
        assert!(!entry.literal);
    }

    #[test]
    fn test_meta_is_not_an_entry() {
        let doc = parse(
            r#"{
                "_meta": { "version": "2", "strict": true, "prefix": "x_" },
                "Name": { "value": "n" }
            }"#,
        );

        assert!(doc.meta.strict);
        assert_eq!(doc.meta.prefix, "x_");
        assert_eq!(doc.meta.version, Some(JsonValue::from("2")));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_first_meta_key_wins() {
        let doc = parse(
            r#"{
                "meta": { "strict": false, "prefix": "second" },
                "_meta": { "strict": true, "prefix": "first" }
            }"#,
        );

        assert!(doc.meta.strict);
        assert_eq!(doc.meta.prefix, "first");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_secondary_meta_key() {
        let doc = parse(r#"{ "meta": { "strict": true } }"#);
        assert!(doc.meta.strict);
        assert_eq!(doc.meta.prefix, "_");
    }

    #[test]
    fn test_malformed_meta_falls_back_to_defaults() {
        let doc = parse(r#"{ "_meta": { "strict": "yes" }, "A": { "value": "a" } }"#);
        assert_eq!(doc.meta, Meta::default());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_empty() {
        assert!(parse("{ not json").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("   \n").is_empty());
        assert!(parse("[1, 2]").is_empty());
    }

    #[test]
    fn test_try_parse_reports_errors() {
        assert!(try_parse("").is_err());
        let err = try_parse("\"text\"").unwrap_err();
        assert!(err.to_string().contains("got string"));
    }
}
