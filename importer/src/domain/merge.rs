//! Structural JSON merging

use serde_json::Value as JsonValue;
use serde_json::map::Entry;

/// Merge `b` into `a`, recursively.
///
/// Objects merge key by key with existing keys keeping their position,
/// arrays concatenate in order with duplicates kept, and any other pairing
/// resolves in favor of `b`. Used to fold the inputs and outputs of several
/// observations into one trace-level document.
pub fn deep_merge(a: JsonValue, b: JsonValue) -> JsonValue {
    match (a, b) {
        (JsonValue::Object(mut merged), JsonValue::Object(incoming)) => {
            for (key, b_value) in incoming {
                match merged.entry(key) {
                    Entry::Occupied(mut slot) => {
                        let a_value = slot.get_mut().take();
                        slot.insert(deep_merge(a_value, b_value));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(b_value);
                    }
                }
            }
            JsonValue::Object(merged)
        }
        (JsonValue::Array(mut items), JsonValue::Array(incoming)) => {
            items.extend(incoming);
            JsonValue::Array(items)
        }
        (_, b) => b,
    }
}
