//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, thresholds, limits)
//! - The user-agent pool and fetch-ladder header profiles
//! - Library configuration and CLI option types

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Command, LogFormat, LogLevel, Opt, OutputFormat, ScraperConfig};
