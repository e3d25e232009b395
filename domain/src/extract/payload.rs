//! Lenient field accessors for extracted payloads.
//!
//! Model output is loosely typed: lists arrive as single strings, numbers
//! arrive where strings were asked for, and `null` means "nothing".

use super::JsonObject;
use serde_json::Value;

/// Non-empty string value for `key` (numbers and booleans are stringified).
pub fn get_string(obj: &JsonObject, key: &str) -> Option<String> {
    value_to_string(obj.get(key)?)
}

/// String list for `key`.
///
/// Accepts an array (non-string scalars stringified, blanks dropped) or a
/// single string. Missing or `null` yields an empty list.
pub fn get_string_list(obj: &JsonObject, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(value_to_string).collect(),
        Some(other) => value_to_string(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Boolean for `key`, accepting `"true"`/`"false"` strings.
pub fn get_bool(obj: &JsonObject, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
