//! Tool-call payload adapter

use serde_json::{Map, Value as JsonValue, json};

/// Reshape a raw tool-call output payload into the collector's shape.
///
/// Only objects with `"type": "tool_calls"` and an array under `"output"`
/// are adapted; everything else passes through untouched. The result is
/// `{"toolCalls": [..], "content": " ", "contents": []}` with one wrapped
/// `{"toolCall": {id, name, input}}` per entry.
pub fn adapt_tool_call_output(value: JsonValue) -> JsonValue {
    if value.get("type").and_then(|t| t.as_str()) != Some("tool_calls") {
        return value;
    }
    let Some(entries) = value.get("output").and_then(|o| o.as_array()) else {
        return value;
    };
    let tool_calls: Vec<JsonValue> = entries
        .iter()
        .filter_map(|entry| entry.as_object())
        .map(|entry| json!({"toolCall": adapt_entry(entry)}))
        .collect();
    json!({
        "toolCalls": tool_calls,
        "content": " ",
        "contents": [],
    })
}

fn adapt_entry(entry: &Map<String, JsonValue>) -> JsonValue {
    let id = entry.get("id").cloned().unwrap_or_else(|| json!(""));
    let (name, input) = match entry.get("function") {
        Some(JsonValue::Object(function)) => (
            function.get("name").cloned().unwrap_or_else(|| json!("")),
            parse_arguments(function.get("arguments")),
        ),
        _ => (
            entry.get("name").cloned().unwrap_or_else(|| json!("")),
            json!({}),
        ),
    };
    json!({"id": id, "name": name, "input": input})
}

// Provider arguments arrive as a JSON-encoded string or a structured object;
// anything else collapses to an empty object.
fn parse_arguments(arguments: Option<&JsonValue>) -> JsonValue {
    match arguments {
        Some(JsonValue::String(text)) => serde_json::from_str(text).unwrap_or_else(|_| json!({})),
        Some(JsonValue::Object(map)) => JsonValue::Object(map.clone()),
        _ => json!({}),
    }
}
