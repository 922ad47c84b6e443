//! Trace import pipeline

use uuid::Uuid;

use crate::core::config::{ImportConfig, TraceIoPolicy};
use crate::core::constants::DEFAULT_TRACE_NAME;
use crate::data::ingestion::{IngestionClient, IngestionError};
use crate::domain::assemble::assemble;
use crate::domain::observation::{Observation, root_observation};
use crate::domain::segment::split_agent_segments;

/// Outcome of one import run
#[derive(Debug)]
pub struct ImportReport {
    /// Identifier the main trace was created under
    pub trace_id: String,
    /// Observations delivered with the main trace
    pub observation_count: usize,
    /// Per-agent traces that were delivered
    pub agent_traces: Vec<AgentTraceReport>,
    /// Agent segments whose delivery failed
    pub segments_failed: usize,
}

/// One delivered per-agent trace
#[derive(Debug)]
pub struct AgentTraceReport {
    pub trace_id: String,
    pub agent_name: String,
    pub observation_count: usize,
}

/// Drives an import run: the full-conversation trace first, then one
/// trace per agent segment.
pub struct ImportPipeline<'a> {
    client: &'a IngestionClient,
    new_ids: bool,
    agent_traces: bool,
    trace_io: TraceIoPolicy,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(client: &'a IngestionClient, config: &ImportConfig) -> Self {
        Self {
            client,
            new_ids: config.new_ids,
            agent_traces: config.agent_traces,
            trace_io: config.trace_io,
        }
    }

    /// Assemble and deliver every trace for the exported observations.
    ///
    /// A main-trace delivery failure aborts the run before any segment is
    /// attempted. A per-segment failure is logged and counted, and the
    /// remaining segments still go out.
    pub async fn run(&self, observations: &[Observation]) -> Result<ImportReport, IngestionError> {
        let root = root_observation(observations);

        let trace_id = if self.new_ids {
            Uuid::new_v4().to_string()
        } else {
            root.map(|r| r.exported_trace_id().to_string())
                .unwrap_or_else(|| Uuid::new_v4().to_string())
        };
        let trace_name = root
            .and_then(|r| r.name.clone())
            .unwrap_or_else(|| DEFAULT_TRACE_NAME.to_string());

        tracing::info!(trace_id = %trace_id, name = %trace_name, "Creating trace");
        let events = assemble(
            observations,
            &trace_id,
            &trace_name,
            self.new_ids,
            None,
            self.trace_io,
        );
        self.client.send(&events).await?;

        let mut report = ImportReport {
            trace_id: trace_id.clone(),
            observation_count: observations.len(),
            agent_traces: Vec::new(),
            segments_failed: 0,
        };
        if !self.agent_traces {
            return Ok(report);
        }

        let segments = split_agent_segments(observations);
        for (index, segment) in segments.iter().enumerate() {
            let agent_name = segment.agent_name();
            let segment_trace_id = if self.new_ids {
                Uuid::new_v4().to_string()
            } else {
                format!("{}-agent-{}", trace_id, index + 1)
            };
            let segment_name = format!("{} Session", agent_name);

            tracing::info!(
                trace_id = %segment_trace_id,
                agent = %agent_name,
                observations = segment.observations.len(),
                "Creating agent trace"
            );
            let events = assemble(
                &segment.observations,
                &segment_trace_id,
                &segment_name,
                self.new_ids,
                Some(agent_name.as_str()),
                TraceIoPolicy::MergeAll,
            );

            match self.client.send(&events).await {
                Ok(()) => report.agent_traces.push(AgentTraceReport {
                    trace_id: segment_trace_id,
                    agent_name,
                    observation_count: segment.observations.len(),
                }),
                Err(err) => {
                    tracing::warn!(
                        agent = %agent_name,
                        error = %err,
                        "Agent trace delivery failed, skipping"
                    );
                    report.segments_failed += 1;
                }
            }
        }

        Ok(report)
    }
}
