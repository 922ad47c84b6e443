//! JSON utility functions

use serde_json::Value as JsonValue;

/// Loose truthiness over JSON values.
///
/// Null, `false`, zero, and empty strings/arrays/objects are all falsy.
/// Optional body fields are only emitted for truthy values, so an exported
/// `"usage": {}` or `"level": ""` is treated the same as an absent field.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}
