//! Exported observation model

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// One exported observation node.
///
/// Field names follow the export format (camelCase). `input`, `output`, and
/// `metadata` arrive as arbitrary JSON: structured values, JSON-encoded
/// strings, or plain strings, all handled downstream by the normalizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: String,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub parent_observation_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw kind as exported (GENERATION, SPAN, EVENT, or anything else)
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Nesting level; only used to order observations before processing
    #[serde(default)]
    pub depth: i64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub input: Option<JsonValue>,
    #[serde(default)]
    pub output: Option<JsonValue>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
    // Generation-only fields
    #[serde(default)]
    pub model: Option<JsonValue>,
    #[serde(default)]
    pub model_parameters: Option<JsonValue>,
    #[serde(default)]
    pub usage: Option<JsonValue>,
    // Diagnostics
    #[serde(default)]
    pub level: Option<JsonValue>,
    #[serde(default)]
    pub status_message: Option<JsonValue>,
    #[serde(default)]
    pub version: Option<JsonValue>,
}

fn default_kind() -> String {
    "SPAN".to_string()
}

/// Observation kinds recognized by the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationKind {
    Generation,
    Span,
    Event,
}

impl ObservationKind {
    /// Ingestion event type for this kind
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Generation => "generation-create",
            Self::Span => "span-create",
            Self::Event => "event-create",
        }
    }
}

impl Observation {
    /// Classify the raw kind; unrecognized kinds fall back to Span
    pub fn classified_kind(&self) -> ObservationKind {
        match self.kind.to_uppercase().as_str() {
            "GENERATION" => ObservationKind::Generation,
            "EVENT" => ObservationKind::Event,
            _ => ObservationKind::Span,
        }
    }

    /// Display name, empty when the export carried none
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Trace identifier carried by the export: `traceId` when non-empty,
    /// the observation's own id otherwise
    pub fn exported_trace_id(&self) -> &str {
        match self.trace_id.as_deref() {
            Some(trace_id) if !trace_id.is_empty() => trace_id,
            _ => &self.id,
        }
    }
}

/// First observation with the minimum depth (original order breaks ties)
pub fn root_observation(observations: &[Observation]) -> Option<&Observation> {
    observations.iter().min_by_key(|obs| obs.depth)
}
