//! Boundary helpers used by the binary.
//!
//! This module provides input validation, output writing and end-of-run
//! statistics logging for the CLI.

pub mod output;
pub mod statistics;
pub mod url;

// Re-export public API
pub use output::{write_document, write_json, SingleResponse};
pub use statistics::{log_batch_statistics, log_single_statistics};
pub use url::{validate_batch, validate_url};
