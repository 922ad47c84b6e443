//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;

pub use crate::app::App;
pub use cli::CliConfig;
pub use config::{ImportConfig, TraceIoPolicy};
