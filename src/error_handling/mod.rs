//! Error handling.
//!
//! Per-URL failures (fetch errors, insufficient content) never escape the
//! orchestrator: they are folded into the URL's own result envelope. Render
//! errors never escape the escalation policy. Only scaffolding failures
//! (logger, HTTP client, output) reach the caller as hard errors.

mod types;

// Re-export public API
pub use types::{
    DocumentError, FetchError, InitializationError, RenderError, ScrapeError, ValidationError,
};
