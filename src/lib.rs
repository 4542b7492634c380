//! page_scraper library: readable, structured content from web pages
//!
//! This library fetches a page through an escalating ladder of browser-like
//! request profiles, strips boilerplate, segments what remains into typed
//! sections and wraps the outcome in a JSON-serializable result envelope.
//! Thin or client-rendered pages can be escalated to a headless browser, and
//! results can be exported as paginated PDF documents.
//!
//! # Example
//!
//! ```no_run
//! use page_scraper::{Scraper, ScraperConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scraper = Scraper::connect(ScraperConfig::default()).await?;
//! let result = scraper
//!     .scrape("https://example.com/", &CancellationToken::new())
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod batch;
pub mod config;
pub mod document;
pub mod error_handling;
pub mod extract;
pub mod fetch;
pub mod initialization;
pub mod render;
pub mod scrape;

// Re-export public API
pub use batch::{scrape_many, BatchResult, BatchSummary};
pub use config::{LogFormat, LogLevel, ScraperConfig};
pub use document::{export_batch, export_single, suggested_filename, ExportedDocument};
pub use error_handling::{
    DocumentError, FetchError, InitializationError, RenderError, ScrapeError, ValidationError,
};
pub use extract::{extract_page, Extraction, Metadata, Section};
pub use fetch::{FetchLadder, PageFetcher};
pub use render::{should_escalate, DynamicRenderer};
pub use scrape::{
    PreviewResult, ScrapeFailure, ScrapeResult, ScrapeStats, ScrapeSuccess, Scraper,
};
