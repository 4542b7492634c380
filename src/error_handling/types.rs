//! Error type definitions.
//!
//! This module defines the error taxonomy of the scraping pipeline:
//! - [`FetchError`]: transport failures of the static fetch ladder
//! - [`ScrapeError`]: why a single orchestrator attempt failed
//! - [`RenderError`]: headless rendering failures (never leave the escalation policy)
//! - [`DocumentError`]: PDF export failures
//! - [`ValidationError`]: boundary-level input validation
//! - [`InitializationError`]: logger and client setup

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Transport-level failure of a static fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a status outside `[200, 400)`.
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// Connection, DNS, TLS, redirect-limit or other client error.
    #[error("Request failed: {0}")]
    Transport(#[source] ReqwestError),

    /// The response body could not be read or decoded.
    #[error("Failed to read response body: {0}")]
    Body(#[source] ReqwestError),

    /// The caller cancelled the fetch.
    #[error("Request cancelled")]
    Cancelled,
}

impl From<ReqwestError> for FetchError {
    fn from(err: ReqwestError) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(err)
        } else {
            FetchError::Transport(err)
        }
    }
}

/// Why a single orchestrator attempt failed.
///
/// Both fetch and content failures are retried the same way; the variant only
/// feeds the log line and the final failure message.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Fetching the page failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Extraction produced less content than the validation threshold.
    #[error(
        "Insufficient content extracted - content too short or empty ({length} < {threshold} characters)"
    )]
    InsufficientContent {
        /// Characters of content that were extracted
        length: usize,
        /// Threshold in force for this attempt
        threshold: usize,
    },

    /// The scrape was cancelled before it could finish.
    #[error("Scrape cancelled")]
    Cancelled,
}

/// Headless rendering failure.
///
/// Rendering errors are swallowed by the escalation policy and turned into
/// "no dynamic content available"; they exist for logging.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No renderer is configured.
    #[error("Dynamic rendering is not available")]
    Unavailable,

    /// The browser or page could not be created.
    #[error("Failed to launch browser context: {0}")]
    Launch(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Navigation exceeded its timeout.
    #[error("Navigation timed out after {0}ms")]
    Timeout(u128),

    /// The rendered HTML could not be captured.
    #[error("Failed to capture rendered HTML: {0}")]
    Capture(String),

    /// The caller cancelled the render.
    #[error("Render cancelled")]
    Cancelled,
}

/// Document export failure.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The PDF backend rejected the document.
    #[error("PDF generation error: {0}")]
    Pdf(String),
}

/// Input validation at the boundary (CLI or any other caller).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// No URL was supplied.
    #[error("URL is required")]
    MissingUrl,

    /// A URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    /// The batch was empty.
    #[error("URLs array is required")]
    EmptyBatch,

    /// More URLs than a batch accepts.
    #[error("Maximum {max} URLs allowed per batch (provided {provided})")]
    TooManyUrls {
        /// Number of URLs supplied
        provided: usize,
        /// Maximum accepted
        max: usize,
    },

    /// Batch concurrency outside its accepted range.
    #[error("Concurrent value must be between {min} and {max} (provided {provided})")]
    ConcurrencyOutOfRange {
        /// Concurrency supplied
        provided: usize,
        /// Minimum accepted
        min: usize,
        /// Maximum accepted
        max: usize,
    },
}
