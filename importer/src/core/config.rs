//! Importer configuration

use std::fmt;
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::core::cli::CliConfig;

/// How trace-level input/output is derived from member observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceIoPolicy {
    /// Input/output of the last chat-completion observation
    #[default]
    LastCompletion,
    /// Deep-merge of every observation's input/output
    MergeAll,
}

impl fmt::Display for TraceIoPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastCompletion => write!(f, "last-completion"),
            Self::MergeAll => write!(f, "merge-all"),
        }
    }
}

/// Resolved importer configuration.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Path to the exported trace file
    pub trace_file: PathBuf,
    pub public_key: String,
    pub secret_key: String,
    /// Langfuse host, without a trailing slash
    pub host: String,
    /// Generate fresh UUIDs for the trace and every observation
    pub new_ids: bool,
    /// Re-segment the conversation into per-agent traces
    pub agent_traces: bool,
    /// Policy for the main trace's derived input/output
    pub trace_io: TraceIoPolicy,
}

impl ImportConfig {
    /// Validate CLI arguments (with `.env` already applied) into a config.
    pub fn load(cli: CliConfig) -> Result<Self> {
        let public_key = cli.public_key.unwrap_or_default();
        let secret_key = cli.secret_key.unwrap_or_default();
        if public_key.is_empty() || secret_key.is_empty() {
            bail!("Langfuse credentials not provided (check .env or CLI args)");
        }

        Ok(Self {
            trace_file: cli.trace_file,
            public_key,
            secret_key,
            host: cli.host.trim_end_matches('/').to_string(),
            new_ids: !cli.keep_ids,
            agent_traces: !cli.no_agent_traces,
            trace_io: cli.trace_io,
        })
    }
}
