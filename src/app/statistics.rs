//! End-of-run summaries.

use log::{info, warn};

use crate::batch::BatchResult;
use crate::scrape::ScrapeResult;

/// Logs a one-line summary of a batch and each failed URL with its error.
pub fn log_batch_statistics(batch: &BatchResult, elapsed_seconds: f64) {
    let summary = &batch.summary;
    info!(
        "✅ Processed {} URL{} ({} succeeded, {} failed, {} words) in {:.1}s",
        summary.total,
        if summary.total == 1 { "" } else { "s" },
        summary.successful,
        summary.failed,
        summary.total_words,
        elapsed_seconds
    );
    for failure in batch.results.iter().filter_map(ScrapeResult::as_failure) {
        warn!(
            "   {} failed after {} attempt(s): {}",
            failure.url, failure.scraping_attempts, failure.error
        );
    }
}

/// Logs the outcome of a single scrape.
pub fn log_single_statistics(result: &ScrapeResult, elapsed_seconds: f64) {
    match result {
        ScrapeResult::Success(success) => info!(
            "✅ Scraped {} ({} words, {} min read{}) in {:.1}s",
            success.url,
            success.word_count,
            success.metadata.reading_time,
            if success.dynamic_rendered {
                ", rendered"
            } else {
                ""
            },
            elapsed_seconds
        ),
        ScrapeResult::Failure(failure) => warn!(
            "❌ Failed to scrape {} after {} attempt(s) in {:.1}s: {}",
            failure.url, failure.scraping_attempts, elapsed_seconds, failure.error
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::ScrapeFailure;

    #[test]
    fn test_log_batch_statistics_with_failures() {
        let batch = BatchResult::new(vec![
            ScrapeFailure::new("https://a.example/", "Request timed out", 3).into(),
        ]);
        // Should not panic
        log_batch_statistics(&batch, 1.5);
    }

    #[test]
    fn test_log_batch_statistics_empty() {
        log_batch_statistics(&BatchResult::new(Vec::new()), 0.0);
    }

    #[test]
    fn test_log_single_statistics_failure() {
        let result: ScrapeResult = ScrapeFailure::new("https://a.example/", "HTTP status 403", 3).into();
        log_single_statistics(&result, 2.0);
    }
}
