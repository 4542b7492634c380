//! Batch controller.
//!
//! Scrapes a URL list in contiguous, fixed-size batches. Members of a batch run
//! concurrently and the controller waits for all of them to settle before
//! pacing and starting the next batch. Results stay index-aligned with the
//! input whatever the completion order.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::info;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::config::{MAX_BATCH_CONCURRENCY, MIN_BATCH_CONCURRENCY};
use crate::error_handling::ScrapeError;
use crate::scrape::{ScrapeFailure, ScrapeResult, Scraper};

/// Aggregate counters over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_words: usize,
    pub total_content_length: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ScrapeResult]) -> Self {
        results.iter().fold(
            BatchSummary {
                total: results.len(),
                ..Default::default()
            },
            |mut summary, result| {
                match result {
                    ScrapeResult::Success(success) => {
                        summary.successful += 1;
                        summary.total_words += success.word_count;
                        summary.total_content_length += success.content.chars().count();
                    }
                    ScrapeResult::Failure(_) => summary.failed += 1,
                }
                summary
            },
        )
    }
}

/// Ordered results of a batch scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// One entry per input URL, in input order
    pub results: Vec<ScrapeResult>,
    pub summary: BatchSummary,
    pub processed_at: DateTime<Utc>,
}

impl BatchResult {
    pub fn new(results: Vec<ScrapeResult>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self {
            results,
            summary,
            processed_at: Utc::now(),
        }
    }
}

/// Clamps a requested concurrency into `[1, 5]`.
pub fn effective_concurrency(requested: usize) -> usize {
    requested.clamp(MIN_BATCH_CONCURRENCY, MAX_BATCH_CONCURRENCY)
}

/// Scrapes `urls` in batches of `concurrency` (clamped to `[1, 5]`).
///
/// Once `cancel` fires, running scrapes end with cancelled failure envelopes,
/// pacing is cut short, and URLs of batches that never started are reported
/// as cancelled with zero attempts.
pub async fn scrape_many(
    scraper: &Scraper,
    urls: &[String],
    concurrency: usize,
    cancel: &CancellationToken,
) -> BatchResult {
    let width = effective_concurrency(concurrency);
    let batches: Vec<&[String]> = urls.chunks(width).collect();
    info!(
        "Starting batch scraping: {} URLs in {} batches of up to {}",
        urls.len(),
        batches.len(),
        width
    );

    let mut results = Vec::with_capacity(urls.len());
    for (index, batch) in batches.iter().enumerate() {
        if cancel.is_cancelled() {
            let reason = ScrapeError::Cancelled.to_string();
            results.extend(
                batch
                    .iter()
                    .map(|url| ScrapeResult::from(ScrapeFailure::new(url, reason.as_str(), 0))),
            );
            continue;
        }

        info!(
            "Processing batch {}/{}: {} URLs",
            index + 1,
            batches.len(),
            batch.len()
        );
        let settled = join_all(batch.iter().map(|url| scraper.scrape(url, cancel))).await;
        results.extend(settled);

        if index + 1 < batches.len() {
            let delay = scraper.config().batch_delay;
            info!("Waiting {}ms before next batch", delay.as_millis());
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    let batch = BatchResult::new(results);
    info!(
        "Batch complete: {}/{} succeeded, {} words",
        batch.summary.successful, batch.summary.total, batch.summary.total_words
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScraperConfig;
    use crate::error_handling::FetchError;
    use crate::fetch::PageFetcher;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Serves an article for every URL except `bad`, sleeping `delay_ms` from the URL.
    struct DelayFetcher {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl DelayFetcher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PageFetcher for DelayFetcher {
        async fn fetch(&self, url: &str, _attempt: u32) -> Result<String, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            let delay = if url.ends_with("/A") { 40 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if url.contains("bad") {
                return Err(FetchError::Status { status: 500 });
            }
            let paragraph = "Batch scraping keeps every result aligned with its input. ".repeat(4);
            Ok(format!(
                "<html><body><article><h1>{url}</h1><p>{paragraph}</p></article></body></html>"
            ))
        }
    }

    fn scraper(fetcher: Arc<DelayFetcher>, batch_delay: Duration) -> Scraper {
        let config = ScraperConfig {
            retry_delay: Duration::from_millis(1),
            batch_delay,
            ..Default::default()
        };
        Scraper::new(fetcher, None, config)
    }

    fn urls(names: &[&str]) -> Vec<String> {
        names
            .iter()
            .map(|name| format!("https://site.example/{name}"))
            .collect()
    }

    #[test]
    fn test_effective_concurrency_is_clamped() {
        assert_eq!(effective_concurrency(0), 1);
        assert_eq!(effective_concurrency(3), 3);
        assert_eq!(effective_concurrency(99), 5);
    }

    #[tokio::test]
    async fn test_results_are_index_aligned() {
        let fetcher = DelayFetcher::new();
        let scraper = scraper(fetcher, Duration::from_millis(1));
        let input = urls(&["A", "B", "C"]);

        let batch = scrape_many(&scraper, &input, 2, &CancellationToken::new()).await;

        let output: Vec<&str> = batch.results.iter().map(|r| r.url()).collect();
        assert_eq!(output, input.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(batch.summary.total, 3);
        assert_eq!(batch.summary.successful, 3);
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_batch_width() {
        let fetcher = DelayFetcher::new();
        let scraper = scraper(fetcher.clone(), Duration::from_millis(1));
        let input = urls(&["1", "2", "3", "4", "5", "6", "7"]);

        scrape_many(&scraper, &input, 3, &CancellationToken::new()).await;

        assert!(fetcher.peak.load(Ordering::SeqCst) <= 3);
        assert!(fetcher.peak.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_pacing_only_between_batches() {
        let fetcher = DelayFetcher::new();
        let scraper = scraper(fetcher, Duration::from_millis(150));
        let started = Instant::now();

        // One batch: no pacing delay at all
        scrape_many(&scraper, &urls(&["x", "y"]), 2, &CancellationToken::new()).await;
        assert!(started.elapsed() < Duration::from_millis(150));

        // Two batches: exactly one pacing delay
        let started = Instant::now();
        scrape_many(&scraper, &urls(&["x", "y", "z"]), 2, &CancellationToken::new()).await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(150));
        assert!(elapsed < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_siblings() {
        let fetcher = DelayFetcher::new();
        let scraper = scraper(fetcher, Duration::from_millis(1));
        let input = urls(&["ok-1", "bad", "ok-2"]);

        let batch = scrape_many(&scraper, &input, 5, &CancellationToken::new()).await;

        assert!(batch.results[0].is_success());
        assert!(!batch.results[1].is_success());
        assert_eq!(batch.results[1].scraping_attempts(), 3);
        assert!(batch.results[2].is_success());
        assert_eq!(batch.summary.successful, 2);
        assert_eq!(batch.summary.failed, 1);
        assert!(batch.summary.total_words > 0);
    }

    #[tokio::test]
    async fn test_cancelled_batch_reports_every_url() {
        let fetcher = DelayFetcher::new();
        let scraper = scraper(fetcher, Duration::from_millis(1));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let input = urls(&["A", "B", "C"]);

        let batch = scrape_many(&scraper, &input, 2, &cancel).await;

        assert_eq!(batch.results.len(), 3);
        assert!(batch.results.iter().all(|r| !r.is_success()));
        assert_eq!(batch.results[2].url(), input[2]);
    }

    #[test]
    fn test_batch_result_serialization() {
        let batch = BatchResult::new(vec![ScrapeResult::from(ScrapeFailure::new(
            "https://a.example/",
            "Request timed out",
            3,
        ))]);
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["summary"]["totalContentLength"], 0);
        assert!(json.get("processedAt").is_some());
        assert_eq!(json["results"][0]["success"], false);
    }
}
