//! Trace assembly.
//!
//! Turns an ordered set of observations into a flat batch of ingestion
//! events: one `trace-create` event followed by one create event per
//! observation. The collector rebuilds the tree from parent references.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue, json};
use uuid::Uuid;

use crate::core::config::TraceIoPolicy;
use crate::core::constants::ID_PREFIX_LEN;
use crate::domain::merge::deep_merge;
use crate::domain::normalize::{normalize_keys, parse_if_encoded};
use crate::domain::observation::{Observation, ObservationKind};
use crate::domain::toolcalls::adapt_tool_call_output;
use crate::utils::json::is_truthy;
use crate::utils::string::truncate_chars;
use crate::utils::time::now_iso;

// ============================================================================
// EVENT MODEL
// ============================================================================

/// One unit of the ingestion batch.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionEvent {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub body: JsonValue,
}

// ============================================================================
// TRACE ASSEMBLY
// ============================================================================

/// Assemble the ingestion batch for one trace.
///
/// Observations are stable-sorted by depth, so parents precede their
/// children and identifier remapping resolves in a single pass. The caller
/// supplies the trace identifier and display name; `new_ids` replaces every
/// observation identifier with a fresh UUID, `agent_name` tags the trace
/// metadata, and `io_policy` selects how trace-level input/output is derived.
pub fn assemble(
    observations: &[Observation],
    trace_id: &str,
    trace_name: &str,
    new_ids: bool,
    agent_name: Option<&str>,
    io_policy: TraceIoPolicy,
) -> Vec<IngestionEvent> {
    let mut sorted: Vec<&Observation> = observations.iter().collect();
    sorted.sort_by_key(|obs| obs.depth);

    // Exported timestamps share one ISO-8601 UTC format, so lexicographic
    // min/max on the verbatim strings is chronological.
    let trace_start = sorted
        .iter()
        .filter_map(|obs| obs.start_time.as_deref())
        .filter(|start| !start.is_empty())
        .min()
        .map(str::to_string)
        .unwrap_or_else(now_iso);
    let trace_end = sorted
        .iter()
        .filter_map(|obs| obs.end_time.as_deref())
        .filter(|end| !end.is_empty())
        .max()
        .map(str::to_string)
        .unwrap_or_else(|| trace_start.clone());

    let (trace_input, trace_output) = match io_policy {
        TraceIoPolicy::LastCompletion => last_completion_io(&sorted),
        TraceIoPolicy::MergeAll => merge_all_io(&sorted),
    };

    let mut metadata = observation_metadata(sorted.first().copied());
    if let Some(agent_name) = agent_name {
        metadata.insert("agentName".to_string(), json!(agent_name));
    }

    // Seeded with the exported trace identifier so observations pointing at
    // the old trace resolve to the new one.
    let mut id_mapping: HashMap<String, String> = HashMap::new();
    if new_ids && let Some(root) = sorted.first() {
        id_mapping.insert(root.exported_trace_id().to_string(), trace_id.to_string());
    }

    let mut events = Vec::with_capacity(sorted.len() + 1);
    events.push(IngestionEvent {
        id: Uuid::new_v4().to_string(),
        timestamp: trace_start.clone(),
        event_type: "trace-create".to_string(),
        body: json!({
            "id": trace_id,
            "name": trace_name,
            "metadata": metadata,
            "startTime": trace_start,
            "endTime": trace_end,
            "input": trace_input,
            "output": trace_output,
        }),
    });
    for obs in sorted {
        events.push(observation_event(obs, trace_id, new_ids, &mut id_mapping));
    }
    events
}

// ============================================================================
// TRACE INPUT/OUTPUT
// ============================================================================

/// Input/output of the last chat-completion observation.
///
/// Scans in reverse, skipping tool-call plumbing, and stops at the first
/// observation whose name contains `chat-completion`. Absent when the
/// conversation never reached a completion.
fn last_completion_io(sorted: &[&Observation]) -> (Option<JsonValue>, Option<JsonValue>) {
    for obs in sorted.iter().rev() {
        let name = obs.name_or_empty();
        if name.contains("tool-call") || name.contains("tool-start-message") {
            continue;
        }
        if name.contains("chat-completion") {
            let input = obs
                .input
                .clone()
                .map(|value| normalize_keys(parse_if_encoded(value)));
            let output = obs
                .output
                .clone()
                .map(|value| normalize_keys(adapt_tool_call_output(parse_if_encoded(value))));
            return (input, output);
        }
    }
    (None, None)
}

/// Fold every observation's input (then output) into one document.
///
/// Contributions are decoded first, merged in sorted order, and the fold
/// result is key-normalized once. Yields `{}` rather than null when nothing
/// contributes.
fn merge_all_io(sorted: &[&Observation]) -> (Option<JsonValue>, Option<JsonValue>) {
    let input = sorted
        .iter()
        .filter_map(|obs| obs.input.clone())
        .map(parse_if_encoded)
        .fold(json!({}), deep_merge);
    let output = sorted
        .iter()
        .filter_map(|obs| obs.output.clone())
        .map(parse_if_encoded)
        .fold(json!({}), deep_merge);
    (Some(normalize_keys(input)), Some(normalize_keys(output)))
}

// ============================================================================
// OBSERVATION EVENTS
// ============================================================================

/// Key-normalized metadata mapping, `{}` when missing or not a mapping.
fn observation_metadata(obs: Option<&Observation>) -> Map<String, JsonValue> {
    let metadata = obs
        .and_then(|obs| obs.metadata.clone())
        .map(normalize_keys)
        .unwrap_or_else(|| json!({}));
    match metadata {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    }
}

fn observation_event(
    obs: &Observation,
    trace_id: &str,
    new_ids: bool,
    id_mapping: &mut HashMap<String, String>,
) -> IngestionEvent {
    let obs_id = if new_ids {
        let fresh = Uuid::new_v4().to_string();
        id_mapping.insert(obs.id.clone(), fresh.clone());
        fresh
    } else {
        obs.id.clone()
    };

    // An unmapped parent is dropped; depth ordering guarantees mapped
    // parents were processed first.
    let parent_id = obs
        .parent_observation_id
        .as_deref()
        .filter(|parent| !parent.is_empty())
        .and_then(|parent| {
            if new_ids {
                id_mapping.get(parent).cloned()
            } else {
                Some(parent.to_string())
            }
        });

    let name = obs.name.clone().unwrap_or_else(|| {
        format!(
            "{}-{}",
            obs.kind.to_lowercase(),
            truncate_chars(&obs_id, ID_PREFIX_LEN)
        )
    });

    let mut body = Map::new();
    body.insert("id".to_string(), json!(obs_id));
    body.insert("traceId".to_string(), json!(trace_id));
    body.insert("name".to_string(), json!(name));
    body.insert("startTime".to_string(), json!(obs.start_time));
    body.insert(
        "metadata".to_string(),
        JsonValue::Object(observation_metadata(Some(obs))),
    );
    if let Some(end_time) = obs.end_time.as_deref().filter(|end| !end.is_empty()) {
        body.insert("endTime".to_string(), json!(end_time));
    }
    if let Some(input) = obs.input.clone() {
        body.insert("input".to_string(), normalize_keys(parse_if_encoded(input)));
    }
    if let Some(output) = obs.output.clone() {
        body.insert(
            "output".to_string(),
            normalize_keys(adapt_tool_call_output(parse_if_encoded(output))),
        );
    }
    if let Some(parent_id) = parent_id {
        body.insert("parentObservationId".to_string(), json!(parent_id));
    }

    let kind = obs.classified_kind();
    if kind == ObservationKind::Generation {
        for (key, value) in [
            ("model", &obs.model),
            ("modelParameters", &obs.model_parameters),
            ("usage", &obs.usage),
        ] {
            if let Some(value) = value
                && is_truthy(value)
            {
                body.insert(key.to_string(), value.clone());
            }
        }
    }
    for (key, value) in [
        ("level", &obs.level),
        ("statusMessage", &obs.status_message),
        ("version", &obs.version),
    ] {
        if let Some(value) = value
            && is_truthy(value)
        {
            body.insert(key.to_string(), value.clone());
        }
    }

    tracing::debug!(kind = %obs.kind, name = %name, "Prepared observation event");

    IngestionEvent {
        id: Uuid::new_v4().to_string(),
        timestamp: obs
            .start_time
            .clone()
            .filter(|start| !start.is_empty())
            .unwrap_or_else(now_iso),
        event_type: kind.event_type().to_string(),
        body: JsonValue::Object(body),
    }
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
