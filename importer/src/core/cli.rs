//! Command-line interface

use clap::Parser;

use std::path::PathBuf;

use super::config::TraceIoPolicy;
use super::constants::{DEFAULT_HOST, ENV_HOST, ENV_PUBLIC_KEY, ENV_SECRET_KEY};

#[derive(Parser, Debug)]
#[command(name = "tracelift")]
#[command(version, about = "Import exported trace files into Langfuse", long_about = None)]
pub struct CliConfig {
    /// Path to the exported trace JSON file
    pub trace_file: PathBuf,

    /// Langfuse public key
    #[arg(long, env = ENV_PUBLIC_KEY)]
    pub public_key: Option<String>,

    /// Langfuse secret key
    #[arg(long, env = ENV_SECRET_KEY)]
    pub secret_key: Option<String>,

    /// Langfuse host URL
    #[arg(long, env = ENV_HOST, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Keep the exported identifiers instead of generating fresh UUIDs
    #[arg(long)]
    pub keep_ids: bool,

    /// Skip per-agent trace generation
    #[arg(long)]
    pub no_agent_traces: bool,

    /// Trace input/output policy (last-completion or merge-all)
    #[arg(long, value_parser = parse_trace_io_policy, default_value = "last-completion")]
    pub trace_io: TraceIoPolicy,
}

/// Parse trace io policy from CLI/env string
fn parse_trace_io_policy(s: &str) -> Result<TraceIoPolicy, String> {
    match s.to_lowercase().as_str() {
        "last-completion" => Ok(TraceIoPolicy::LastCompletion),
        "merge-all" => Ok(TraceIoPolicy::MergeAll),
        _ => Err(format!(
            "Invalid trace io policy '{}'. Valid options: last-completion, merge-all",
            s
        )),
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    CliConfig::parse()
}
