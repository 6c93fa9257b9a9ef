//! Token-Oriented Object Notation encoder
//!
//! TOON is a line-oriented rendering of the JSON data model meant to cost fewer
//! tokens than JSON when the output is read by a language model:
//!
//! ```text
//! incidents[2]{incident_id,title,progress}:
//!   inc-1,Disk full,Triggered
//!   inc-2,CPU high,Closed
//! total: 2
//! ```
//!
//! - objects become `key: value` lines, nested objects are indented by two spaces
//! - arrays carry their length: `tags[3]: a,b,c`
//! - arrays of flat objects sharing one key set become a table with a
//!   `{field,...}` header and one comma-separated row per element
//! - everything else is a `- ` list
//!
//! Strings are quoted only when they would otherwise be ambiguous.

use serde::Serialize;
use serde_json::{Map, Value};

const INDENT: &str = "  ";

/// Encode any serializable value as TOON.
pub fn to_toon<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(encode(&serde_json::to_value(value)?))
}

/// Encode a JSON value as TOON. The output has no trailing newline.
pub fn encode(value: &Value) -> String {
    let mut lines = Vec::new();
    match value {
        Value::Object(map) => encode_fields(map, 0, &mut lines),
        Value::Array(items) => encode_array(None, items, 0, &mut lines),
        primitive => lines.push(format_primitive(primitive)),
    }
    lines.join("\n")
}

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

fn encode_fields(map: &Map<String, Value>, depth: usize, lines: &mut Vec<String>) {
    for (key, value) in map {
        encode_field(key, value, depth, lines);
    }
}

fn encode_field(key: &str, value: &Value, depth: usize, lines: &mut Vec<String>) {
    let key = format_key(key);
    match value {
        Value::Object(map) => {
            lines.push(format!("{}{key}:", indent(depth)));
            encode_fields(map, depth + 1, lines);
        }
        Value::Array(items) => encode_array(Some(&key), items, depth, lines),
        primitive => lines.push(format!("{}{key}: {}", indent(depth), format_primitive(primitive))),
    }
}

fn encode_array(key: Option<&str>, items: &[Value], depth: usize, lines: &mut Vec<String>) {
    let header = format!("{}{}[{}]", indent(depth), key.unwrap_or_default(), items.len());

    if items.iter().all(is_primitive) {
        if items.is_empty() {
            lines.push(format!("{header}:"));
        } else {
            let row = items.iter().map(format_primitive).collect::<Vec<_>>().join(",");
            lines.push(format!("{header}: {row}"));
        }
        return;
    }

    if let Some(fields) = tabular_fields(items) {
        let names = fields.iter().map(|f| format_key(f)).collect::<Vec<_>>().join(",");
        lines.push(format!("{header}{{{names}}}:"));
        for item in items {
            if let Value::Object(map) = item {
                let row = fields
                    .iter()
                    .map(|f| map.get(*f).map(format_primitive).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(",");
                lines.push(format!("{}{row}", indent(depth + 1)));
            }
        }
        return;
    }

    lines.push(format!("{header}:"));
    for item in items {
        encode_list_item(item, depth + 1, lines);
    }
}

/// Emit one `- ` entry. Nested structures are rendered one level deeper and
/// their first line is pulled up onto the hyphen.
fn encode_list_item(item: &Value, depth: usize, lines: &mut Vec<String>) {
    let marker = format!("{}- ", indent(depth));
    let mut nested = Vec::new();
    match item {
        Value::Object(map) if map.is_empty() => {
            lines.push(format!("{}-", indent(depth)));
            return;
        }
        Value::Object(map) => encode_fields(map, depth + 1, &mut nested),
        Value::Array(items) => encode_array(None, items, depth + 1, &mut nested),
        primitive => {
            lines.push(format!("{marker}{}", format_primitive(primitive)));
            return;
        }
    }

    let inner = indent(depth + 1);
    let mut nested = nested.into_iter();
    if let Some(first) = nested.next() {
        let first = first.strip_prefix(inner.as_str()).unwrap_or(&first);
        lines.push(format!("{marker}{first}"));
    }
    lines.extend(nested);
}

/// Field order of the first element when every element is a non-empty object
/// with the same key set and only primitive values.
fn tabular_fields(items: &[Value]) -> Option<Vec<&str>> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();
    let uniform = items.iter().all(|item| {
        item.as_object().is_some_and(|map| {
            map.len() == fields.len()
                && fields
                    .iter()
                    .all(|f| map.get(*f).is_some_and(is_primitive))
        })
    });
    uniform.then_some(fields)
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn format_primitive(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format_string(s),
        // Only primitives reach here
        other => other.to_string(),
    }
}

fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if bare { key.to_string() } else { quote(key) }
}

fn format_string(s: &str) -> String {
    if needs_quotes(s) { quote(s) } else { s.to_string() }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.trim() != s
        || matches!(s, "true" | "false" | "null")
        || s.starts_with('-')
        || looks_numeric(s)
        || s.chars().any(|c| {
            matches!(c, ',' | ':' | '"' | '\\' | '[' | ']' | '{' | '}' | '#') || c.is_control()
        })
}

fn looks_numeric(s: &str) -> bool {
    s.parse::<f64>().is_ok() || (s.len() > 1 && s.starts_with('0') && s.bytes().all(|b| b.is_ascii_digit()))
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
