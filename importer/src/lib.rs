//! Langfuse trace importer
//!
//! Converts exported trace files into Langfuse ingestion batches, optionally
//! re-segmenting the conversation into per-agent traces around handoffs.

mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
