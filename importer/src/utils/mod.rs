//! Utility functions for the importer

pub mod json;
pub mod string;
pub mod time;
