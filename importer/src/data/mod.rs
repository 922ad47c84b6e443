//! Data access layer
//!
//! - `ingestion` - Langfuse ingestion API client
//! - `reader` - exported trace file loading and decoding

pub mod ingestion;
pub mod reader;

pub use ingestion::{IngestionClient, IngestionError};
pub use reader::{ReadError, load_observations};
