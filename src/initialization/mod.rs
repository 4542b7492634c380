//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger (plain or JSON)
//! - HTTP client for the fetch ladder
//! - Optional headless renderer for escalation
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod renderer;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use renderer::init_renderer;
