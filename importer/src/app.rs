//! Core application

use anyhow::{Result, ensure};

use crate::core::cli;
use crate::core::config::ImportConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::ingestion::IngestionClient;
use crate::data::reader::load_observations;
use crate::domain::pipeline::{ImportPipeline, ImportReport};

pub struct App;

impl App {
    /// Run the importer with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        let cli_config = cli::parse();
        let config = ImportConfig::load(cli_config)?;

        tracing::info!(file = %config.trace_file.display(), "Loading trace file");
        let observations = load_observations(&config.trace_file)?;
        ensure!(!observations.is_empty(), "No observations found in file");
        tracing::info!(
            count = observations.len(),
            policy = %config.trace_io,
            "Loaded observations"
        );

        let client = IngestionClient::new(&config.host, &config.public_key, &config.secret_key)?;
        let report = ImportPipeline::new(&client, &config)
            .run(&observations)
            .await?;

        Self::print_summary(&client, &report);
        Ok(())
    }

    fn print_summary(client: &IngestionClient, report: &ImportReport) {
        println!("\n✓ Successfully imported trace!");
        println!("  Trace ID: {}", report.trace_id);
        println!("  Observations: {}", report.observation_count);
        println!("  View at: {}", client.trace_url(&report.trace_id));

        for agent in &report.agent_traces {
            println!();
            println!(
                "  Agent trace: {} ({} observations)",
                agent.agent_name, agent.observation_count
            );
            println!("  View at: {}", client.trace_url(&agent.trace_id));
        }

        if report.segments_failed > 0 {
            println!(
                "\n  {} agent segment(s) failed to deliver",
                report.segments_failed
            );
        }
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
