//! Value normalization for exported payloads
//!
//! Exports frequently carry JSON documents as embedded strings, sometimes
//! nested several levels deep. [`parse_if_encoded`] recovers the structure;
//! [`normalize_keys`] renames camelCase tool-call keys to the snake_case
//! spelling the ingestion API expects.

use serde_json::Value as JsonValue;

/// Recursively decode JSON-encoded strings into structured values.
///
/// Strings that parse as JSON are replaced by the parsed value and decoded
/// again, so double-encoded payloads unwrap fully. Strings that do not parse
/// are kept verbatim. Containers are walked element by element.
pub fn parse_if_encoded(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::String(text) => match serde_json::from_str::<JsonValue>(&text) {
            Ok(parsed) => parse_if_encoded(parsed),
            Err(_) => JsonValue::String(text),
        },
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(key, val)| (key, parse_if_encoded(val)))
                .collect(),
        ),
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(parse_if_encoded).collect())
        }
        other => other,
    }
}

/// Rename tool-call keys from camelCase to snake_case, recursively.
///
/// Object keys are rewritten on exact match. String values go through a
/// substring replacement chain instead, since payloads sometimes mention
/// the keys in embedded text.
pub fn normalize_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::String(text) => JsonValue::String(rewrite_embedded(text)),
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(key, val)| (rewrite_key(key), normalize_keys(val)))
                .collect(),
        ),
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(normalize_keys).collect())
        }
        other => other,
    }
}

fn rewrite_key(key: String) -> String {
    match key.as_str() {
        "toolCallId" => "tool_call_id".to_string(),
        "toolCalls" => "tool_calls".to_string(),
        "toolCall" => "tool_call".to_string(),
        _ => key,
    }
}

// Longest variant first so `toolCall` does not clobber `toolCallId`.
fn rewrite_embedded(text: String) -> String {
    text.replace("toolCallId", "tool_call_id")
        .replace("toolCalls", "tool_calls")
        .replace("toolCall", "tool_call")
}
