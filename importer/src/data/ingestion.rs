//! Langfuse ingestion API client

use serde::Serialize;
use thiserror::Error;

use crate::core::constants::{
    INGESTION_PATH, INGESTION_SUCCESS_STATUSES, INGESTION_TIMEOUT_SECS, RESPONSE_PREVIEW_LEN,
    SDK_INTEGRATION, SDK_NAME,
};
use crate::domain::assemble::IngestionEvent;
use crate::utils::string::truncate_chars;

/// Errors from the ingestion API client
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ingestion API returned {status}: {body}")]
    Delivery { status: u16, body: String },
}

/// One ingestion request: the event batch plus importer metadata.
#[derive(Serialize)]
struct IngestionPayload<'a> {
    batch: &'a [IngestionEvent],
    metadata: BatchMetadata,
}

#[derive(Serialize)]
struct BatchMetadata {
    batch_size: usize,
    sdk_integration: &'static str,
    sdk_name: &'static str,
    sdk_version: &'static str,
}

/// Client for the Langfuse ingestion API
#[derive(Debug)]
pub struct IngestionClient {
    client: reqwest::Client,
    host: String,
    public_key: String,
    secret_key: String,
}

impl IngestionClient {
    pub fn new(host: &str, public_key: &str, secret_key: &str) -> Result<Self, IngestionError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(INGESTION_TIMEOUT_SECS))
            .user_agent(format!("tracelift/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IngestionError::Client(e.to_string()))?;

        tracing::debug!(host = %host, "Initialized ingestion client");
        Ok(Self {
            client,
            host: host.to_string(),
            public_key: public_key.to_string(),
            secret_key: secret_key.to_string(),
        })
    }

    /// Batch endpoint: {host}/api/public/ingestion
    fn ingestion_url(&self) -> String {
        format!("{}{}", self.host, INGESTION_PATH)
    }

    /// Web UI URL for a trace
    pub fn trace_url(&self, trace_id: &str) -> String {
        format!("{}/trace/{}", self.host, trace_id)
    }

    /// Deliver one batch of events, authenticated with the configured key pair.
    pub async fn send(&self, batch: &[IngestionEvent]) -> Result<(), IngestionError> {
        let payload = IngestionPayload {
            batch,
            metadata: BatchMetadata {
                batch_size: batch.len(),
                sdk_integration: SDK_INTEGRATION,
                sdk_name: SDK_NAME,
                sdk_version: env!("CARGO_PKG_VERSION"),
            },
        };

        let url = self.ingestion_url();
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = truncate_chars(&response.text().await?, RESPONSE_PREVIEW_LEN);
        tracing::info!(status = status, "Ingestion response");
        tracing::debug!(body = %body, "Ingestion response body");

        if INGESTION_SUCCESS_STATUSES.contains(&status) {
            Ok(())
        } else {
            Err(IngestionError::Delivery { status, body })
        }
    }
}
