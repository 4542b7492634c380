//! Scrape orchestrator.
//!
//! Runs the per-URL state machine: fetch with the attempt's header profile,
//! extract, optionally escalate to a headless render, validate, and retry with
//! linear backoff. The outcome is always a [`ScrapeResult`]; expected failures
//! (bot walls, timeouts, thin pages) end up in a failure envelope instead of
//! an error.

mod result;

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use crate::config::ScraperConfig;
use crate::error_handling::{InitializationError, ScrapeError};
use crate::extract::{extract_page, Extraction};
use crate::fetch::{FetchLadder, PageFetcher};
use crate::initialization::{init_client, init_renderer};
use crate::render::{escalate, should_escalate, DynamicRenderer};

pub use result::{PreviewResult, ScrapeFailure, ScrapeResult, ScrapeStats, ScrapeSuccess};

/// Delays between attempts: `n * base` after attempt `n`, none after the last.
pub fn linear_backoff(base: Duration, max_attempts: u32) -> impl Iterator<Item = Duration> {
    (1..max_attempts.max(1)).map(move |attempt| base * attempt)
}

/// Checks extracted content against the validation threshold.
fn validate(extraction: &Extraction, threshold: usize) -> Result<(), ScrapeError> {
    let length = if extraction.is_empty() {
        0
    } else {
        extraction.content.chars().count()
    };
    if length < threshold {
        return Err(ScrapeError::InsufficientContent { length, threshold });
    }
    Ok(())
}

/// Per-URL orchestrator.
///
/// Holds only shared, read-only resources, so one `Scraper` can serve any
/// number of concurrent scrapes.
pub struct Scraper {
    fetcher: Arc<dyn PageFetcher>,
    renderer: Option<Arc<dyn DynamicRenderer>>,
    config: Arc<ScraperConfig>,
}

impl Scraper {
    /// Assembles a scraper from explicit parts.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        renderer: Option<Arc<dyn DynamicRenderer>>,
        config: ScraperConfig,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            config: Arc::new(config),
        }
    }

    /// Builds the HTTP client and, when enabled, the headless renderer.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the HTTP client cannot
    /// be built. A renderer that fails to launch is not an error.
    pub async fn connect(config: ScraperConfig) -> Result<Self, InitializationError> {
        let client = init_client(&config)?;
        let renderer = init_renderer(&config).await;
        Ok(Self::new(Arc::new(FetchLadder::new(client)), renderer, config))
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Whether a dynamic renderer is available for escalation.
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Scrapes one URL. Never fails: exhaustion or cancellation produce a
    /// [`ScrapeFailure`] carrying the last error and the attempts made.
    pub async fn scrape(&self, url: &str, cancel: &CancellationToken) -> ScrapeResult {
        let attempt_count = AtomicU32::new(0);
        let escalation_used = AtomicBool::new(false);
        let (attempts, escalated) = (&attempt_count, &escalation_used);

        let retry = RetryIf::spawn(
            linear_backoff(self.config.retry_delay, self.config.max_attempts),
            move || async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                let result = self.attempt(url, attempt, escalated, cancel).await;
                if let Err(e) = &result {
                    warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt, self.config.max_attempts, url, e
                    );
                    if attempt < self.config.max_attempts && !cancel.is_cancelled() {
                        debug!(
                            "Waiting {}ms before retrying {}",
                            (self.config.retry_delay * attempt).as_millis(),
                            url
                        );
                    }
                }
                result
            },
            |e: &ScrapeError| !matches!(e, ScrapeError::Cancelled),
        );

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ScrapeError::Cancelled),
            outcome = retry => outcome,
        };

        let made = attempt_count.load(Ordering::SeqCst);
        match outcome {
            Ok(success) => {
                info!(
                    "Successfully scraped {} ({} words, attempt {})",
                    url, success.word_count, success.scraping_attempts
                );
                success.into()
            }
            Err(e) => {
                warn!("Giving up on {} after {} attempt(s): {}", url, made, e);
                ScrapeFailure::new(url, e.to_string(), made).into()
            }
        }
    }

    /// One pass through fetch, extraction, escalation and validation.
    async fn attempt(
        &self,
        url: &str,
        attempt: u32,
        escalated: &AtomicBool,
        cancel: &CancellationToken,
    ) -> Result<ScrapeSuccess, ScrapeError> {
        info!(
            "Scraping attempt {}/{}: {}",
            attempt, self.config.max_attempts, url
        );

        let html = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ScrapeError::Cancelled),
            html = self.fetcher.fetch(url, attempt) => html?,
        };

        let max_length = self.config.max_content_length;
        let mut extraction = extract_page(&html, url, max_length);
        let mut dynamic_rendered = false;

        if let Some(renderer) = &self.renderer {
            if !escalated.load(Ordering::SeqCst) {
                if let Some(reason) = should_escalate(&extraction, &self.config) {
                    escalated.store(true, Ordering::SeqCst);
                    info!("Escalating {} to dynamic rendering: {}", url, reason);
                    if let Some(rendered) = escalate(renderer.as_ref(), url, cancel).await {
                        extraction = extract_page(&rendered, url, max_length);
                        dynamic_rendered = true;
                    }
                }
            }
        }
        if cancel.is_cancelled() {
            return Err(ScrapeError::Cancelled);
        }

        validate(&extraction, self.config.content_threshold(dynamic_rendered))?;

        Ok(ScrapeSuccess {
            url: url.to_string(),
            title: extraction.title,
            content: extraction.content,
            structured_content: extraction.sections,
            metadata: extraction.metadata,
            timestamp: Utc::now(),
            success: true,
            word_count: extraction.word_count,
            scraping_attempts: attempt,
            dynamic_rendered,
        })
    }
}
