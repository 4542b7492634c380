//! Configuration constants.
//!
//! This module defines the operational constants used throughout the scraper:
//! timeouts, retry and pacing delays, content thresholds and batch limits.
//! Every tunable here is also a field of [`ScraperConfig`](super::ScraperConfig),
//! so these values are defaults rather than hard limits.

use std::time::Duration;

// Fetch ladder
/// Per-request timeout for static HTTP fetches
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum number of redirect hops followed by the HTTP client
pub const MAX_REDIRECT_HOPS: usize = 5;
/// Number of escalating header profiles in the fetch ladder
pub const FETCH_STRATEGY_COUNT: usize = 3;

// Retry strategy
/// Maximum number of attempts per URL (initial attempt + 2 retries)
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
/// Base delay for linear backoff; the wait after attempt `n` is `n * RETRY_BASE_DELAY`
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(2000);

// Batch controller
/// Delay inserted between consecutive batches (never after the last one)
pub const BATCH_DELAY: Duration = Duration::from_millis(3000);
/// Smallest accepted batch concurrency
pub const MIN_BATCH_CONCURRENCY: usize = 1;
/// Largest accepted batch concurrency
pub const MAX_BATCH_CONCURRENCY: usize = 5;
/// Default batch concurrency when the caller does not specify one
pub const DEFAULT_BATCH_CONCURRENCY: usize = 2;
/// Maximum number of URLs accepted in one batch request
pub const MAX_BATCH_URLS: usize = 20;

// Content validation
/// Minimum content length (characters) for a statically fetched page
pub const MIN_CONTENT_LENGTH: usize = 100;
/// Minimum content length (characters) once dynamic rendering was used
pub const MIN_DYNAMIC_CONTENT_LENGTH: usize = 40;
/// Hard cap on the plain-text content carried in a result
pub const MAX_CONTENT_LENGTH: usize = 50_000;
/// Maximum characters in one paragraph section before a new one is opened
pub const PARAGRAPH_MAX_CHARS: usize = 1000;
/// Titles must be strictly shorter than this after cleaning
pub const MAX_TITLE_LENGTH: usize = 300;
/// Fallback content is only accepted above this length
pub const FALLBACK_MIN_CONTENT_LENGTH: usize = 200;
/// Paragraphs shorter than this are ignored by the paragraph fallback
pub const FALLBACK_MIN_PARAGRAPH_LENGTH: usize = 50;
/// Words per minute used to derive `readingTime`
pub const WORDS_PER_MINUTE: usize = 200;
/// Number of content characters returned by a preview
pub const PREVIEW_CHARS: usize = 800;

/// Returned as the title when no candidate survives cleaning.
pub const NO_TITLE: &str = "No title found";
/// Returned as the content when nothing usable could be extracted.
pub const NO_CONTENT: &str = "No content found";

// Render escalation
/// Escalate when the rendered plain text is shorter than this
pub const ESCALATION_MIN_TEXT_LENGTH: usize = 150;
/// Escalate when the raw `<body>` text is shorter than this
pub const ESCALATION_MIN_BODY_TEXT_LENGTH: usize = 350;
/// Navigation timeout for the headless browser
pub const RENDER_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
/// How long to wait for a content selector to appear after navigation
pub const RENDER_SELECTOR_TIMEOUT: Duration = Duration::from_secs(10);
/// Flat wait that races the selector wait
pub const RENDER_FLAT_TIMEOUT: Duration = Duration::from_secs(5);
/// Settle delay after the race, for client-side hydration
pub const RENDER_SETTLE_DELAY: Duration = Duration::from_millis(2000);
/// Poll interval while waiting for a content selector
pub const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(250);
