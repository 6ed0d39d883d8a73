//! Flat key/value adapter
//!
//! One `name<marker>=value` pair per line:
//!
//! ```ini
//! ; lines starting with anything but a letter or digit are comments
//! LogPath=%TEMP%\app.log
//! Banner:=100% literal, never expanded
//! Hosts;=alpha;beta;gamma
//! Ports=80,443
//! ```
//!
//! The marker is a run of non-space, non-alphanumeric characters. `:` or `!`
//! on their own mark the entry literal; any other marker is the list
//! delimiter used when the target is an array (comma when empty). The value
//! is everything after `=`, whitespace included.

use std::sync::OnceLock;

use regex::Regex;

use crate::document::{ConfigDocument, Entry, Format};

/// Markers that make an entry literal
pub const LITERAL_MARKERS: [&str; 2] = [":", "!"];

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([[:alnum:]]+)\s*([^\s[:alnum:]=]*)\s*=(.*)$")
            .expect("INI line pattern is valid")
    })
}

/// Parse INI text into a document
///
/// There is no failure mode: lines that are neither comments nor data are
/// skipped.
pub fn parse(text: &str) -> ConfigDocument {
    let mut doc = ConfigDocument::new(Format::Ini);

    for (index, line) in text.lines().enumerate() {
        match line.trim_start().chars().next() {
            None => continue,
            Some(c) if !c.is_ascii_alphanumeric() => continue,
            Some(_) => {}
        }

        match parse_line(line) {
            Some(entry) => doc.insert(entry),
            None => log::trace!("Skipping malformed line {}: {:?}", index + 1, line),
        }
    }

    doc
}

/// Parse one data line
fn parse_line(line: &str) -> Option<Entry> {
    let caps = line_pattern().captures(line)?;
    let name = caps.get(1)?.as_str();
    let marker = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    let value = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

    let entry = Entry::new(name, value);
    if LITERAL_MARKERS.contains(&marker) {
        Some(entry.with_literal(true))
    } else if marker.is_empty() {
        Some(entry)
    } else {
        Some(entry.with_array_delimiter(marker))
    }
}
