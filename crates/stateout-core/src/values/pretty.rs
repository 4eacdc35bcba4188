//! Human-oriented rendering of dynamic values
//!
//! Lists and maps are spread over several lines with two-space indentation;
//! map keys are aligned on `=`. Strings are quoted with template sequences
//! escaped so the text can be pasted back into a configuration.

use serde_json::{Map, Value};

const INDENT: usize = 2;

/// Render a value for humans.
#[must_use]
pub fn format_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::String(text) => write_string(out, text),
        Value::Array(items) => write_list(out, items, indent),
        Value::Object(fields) => write_map(out, fields, indent),
    }
}

fn write_list(out: &mut String, items: &[Value], indent: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }

    out.push_str("[\n");
    for item in items {
        pad(out, indent + INDENT);
        write_value(out, item, indent + INDENT);
        out.push_str(",\n");
    }
    pad(out, indent);
    out.push(']');
}

fn write_map(out: &mut String, fields: &Map<String, Value>, indent: usize) {
    if fields.is_empty() {
        out.push_str("{}");
        return;
    }

    let keys: Vec<(String, &Value)> = fields
        .iter()
        .map(|(key, field)| (format_key(key), field))
        .collect();
    let width = keys
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    out.push_str("{\n");
    for (key, field) in keys {
        pad(out, indent + INDENT);
        out.push_str(&format!("{key:<width$} = "));
        write_value(out, field, indent + INDENT);
        out.push('\n');
    }
    pad(out, indent);
    out.push('}');
}

/// Identifier-like keys stay bare; anything else is quoted.
fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if is_identifier {
        key.to_string()
    } else {
        let mut quoted = String::new();
        write_string(&mut quoted, key);
        quoted
    }
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}
