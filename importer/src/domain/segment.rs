//! Agent segmentation.
//!
//! Multi-agent conversations are exported as one flat observation list. This
//! module detects handoff boundaries (tool calls that transfer control to
//! another agent or end the call) and partitions the list into contiguous
//! per-agent segments, each carrying a human-readable agent name.

use serde_json::Value as JsonValue;

use crate::domain::observation::Observation;

// Case-insensitive markers that signal control transfer or call termination.
const HANDOFF_MARKERS: [&str; 2] = ["handoff", "endcall"];

// ============================================================================
// SEGMENTS
// ============================================================================

/// One agent's contiguous run of observations.
#[derive(Debug, Clone)]
pub struct AgentSegment {
    /// Prettified target of the handoff call that opened this segment.
    name_hint: Option<String>,
    pub observations: Vec<Observation>,
}

impl AgentSegment {
    /// Display name for this segment's agent.
    ///
    /// The target named by the opening handoff call wins; segments without
    /// one (the first agent, or a segment after an end-call) fall back to
    /// [`infer_agent_name`].
    pub fn agent_name(&self) -> String {
        match &self.name_hint {
            Some(name) => name.clone(),
            None => infer_agent_name(&self.observations),
        }
    }
}

/// Partition observations into per-agent segments.
///
/// Single pass in original order. A handoff call closes the current segment;
/// a handoff result only marks the boundary. Both are dropped, along with
/// everything else until the next agent's first turn (an observation whose
/// name starts with `chat-completion`). Empty segments are never stored.
pub fn split_agent_segments(observations: &[Observation]) -> Vec<AgentSegment> {
    let mut segments = Vec::new();
    let mut current: Vec<Observation> = Vec::new();
    let mut name_hint: Option<String> = None;
    let mut skipping = false;

    for obs in observations {
        if is_handoff_call(obs) {
            if !current.is_empty() {
                segments.push(AgentSegment {
                    name_hint: name_hint.take(),
                    observations: std::mem::take(&mut current),
                });
            }
            // The call names the agent that owns the next segment.
            name_hint = handoff_target(obs);
            skipping = true;
            tracing::debug!(name = %obs.name_or_empty(), "Handoff call, closing segment");
            continue;
        }
        if is_handoff_result(obs) {
            skipping = true;
            continue;
        }
        if skipping && obs.name_or_empty().starts_with("chat-completion") {
            skipping = false;
        }
        if !skipping {
            current.push(obs.clone());
        }
    }
    if !current.is_empty() {
        segments.push(AgentSegment {
            name_hint,
            observations: current,
        });
    }
    segments
}

// ============================================================================
// BOUNDARY DETECTION
// ============================================================================

/// Whether the observation's output is a tool call that hands off or ends
/// the call.
pub fn is_handoff_call(obs: &Observation) -> bool {
    let Some(output) = decode_field(obs.output.as_ref()) else {
        return false;
    };
    if output.get("type").and_then(|t| t.as_str()) != Some("tool_calls") {
        return false;
    }
    let Some(entries) = output.get("output").and_then(|o| o.as_array()) else {
        return false;
    };
    entries.iter().filter_map(entry_function_name).any(matches_handoff)
}

/// Whether the observation is the result side of a handoff: a matching name,
/// a `toolCalls` input naming a handoff, or an output sequence containing a
/// matching entry.
pub fn is_handoff_result(obs: &Observation) -> bool {
    if matches_handoff(obs.name_or_empty()) {
        return true;
    }
    if let Some(input) = decode_field(obs.input.as_ref())
        && let Some(calls) = input.get("toolCalls").and_then(|calls| calls.as_array())
        && calls.iter().any(|call| {
            call.get("toolCall")
                .and_then(|tool_call| tool_call.get("name"))
                .and_then(|name| name.as_str())
                .is_some_and(matches_handoff)
        })
    {
        return true;
    }
    if let Some(JsonValue::Array(items)) = decode_field(obs.output.as_ref()) {
        return items.iter().any(|item| {
            item.get("name")
                .and_then(|name| name.as_str())
                .is_some_and(matches_handoff)
        });
    }
    false
}

fn matches_handoff(name: &str) -> bool {
    let name = name.to_lowercase();
    HANDOFF_MARKERS.iter().any(|marker| name.contains(marker))
}

// Mirrors the shape the payload adapter accepts: a function-carrying entry
// uses the function's name, a bare entry its own.
fn entry_function_name(entry: &JsonValue) -> Option<&str> {
    match entry.get("function") {
        Some(JsonValue::Object(function)) => function.get("name").and_then(|name| name.as_str()),
        _ => entry.get("name").and_then(|name| name.as_str()),
    }
}

// One-level decode: boundary payloads arrive either structured or as a
// JSON-encoded string.
fn decode_field(value: Option<&JsonValue>) -> Option<JsonValue> {
    let value = value?;
    Some(match value {
        JsonValue::String(text) => serde_json::from_str(text).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    })
}

// ============================================================================
// AGENT NAMING
// ============================================================================

/// Infer an agent name from a segment's own observations.
///
/// Scans for the first handoff target named in a tool-call output; falls
/// back to the first observation's name with any parenthesized suffix
/// stripped, then to `"Agent"`.
pub fn infer_agent_name(segment: &[Observation]) -> String {
    if let Some(name) = segment.iter().find_map(handoff_target) {
        return name;
    }
    let Some(first) = segment.first() else {
        return "Agent".to_string();
    };
    let name = first.name_or_empty();
    let name = name.split_once('(').map_or(name, |(head, _)| head).trim();
    if name.is_empty() {
        "Agent".to_string()
    } else {
        name.to_string()
    }
}

/// Prettified target of a handoff call, `None` when none is named.
fn handoff_target(obs: &Observation) -> Option<String> {
    let output = decode_field(obs.output.as_ref())?;
    if output.get("type").and_then(|t| t.as_str()) != Some("tool_calls") {
        return None;
    }
    let entries = output.get("output").and_then(|o| o.as_array())?;
    entries
        .iter()
        .filter_map(entry_function_name)
        .find(|name| name.to_lowercase().contains("handoff"))
        .map(prettify_handoff_target)
        .filter(|name| !name.is_empty())
}

// "handoff_to_billing_agent" -> "Billing Agent"
fn prettify_handoff_target(raw: &str) -> String {
    let target = raw.strip_prefix("handoff_to_").unwrap_or(raw);
    target
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
