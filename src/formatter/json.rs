//! JSON pretty-printing and detection.
//!
//! Both functions are total: they never fail and never panic. Input that does
//! not parse as JSON is passed through unchanged.

use serde::Serialize;
use serde_json::Value;

/// Reformats JSON text with 2-space indentation.
///
/// Object keys come out sorted, so the same document always formats to the
/// same text regardless of the key order it arrived in. Anything that is not
/// valid JSON (including the empty string) is returned as-is.
///
/// # Examples
///
/// ```
/// use percentman::formatter::format_pretty;
///
/// assert_eq!(format_pretty(r#"{"b":1,"a":[true]}"#), "{\n  \"a\": [\n    true\n  ],\n  \"b\": 1\n}");
/// assert_eq!(format_pretty("not json"), "not json");
/// ```
pub fn format_pretty(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => to_pretty(&value).unwrap_or_else(|| text.to_string()),
        Err(_) => text.to_string(),
    }
}

/// Reports whether `text` parses as JSON.
///
/// # Examples
///
/// ```
/// use percentman::formatter::is_structured;
///
/// assert!(is_structured(r#"{"valid": true}"#));
/// assert!(is_structured("42"));
/// assert!(!is_structured("not json"));
/// assert!(!is_structured(""));
/// ```
pub fn is_structured(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}

fn to_pretty(value: &Value) -> Option<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).ok()?;
    String::from_utf8(buf).ok()
}
