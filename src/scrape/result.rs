//! Scrape result envelopes.
//!
//! A scrape always produces a [`ScrapeResult`]: either a [`ScrapeSuccess`]
//! with extracted content or a [`ScrapeFailure`] carrying the last error.
//! Both serialize to flat camelCase JSON objects distinguished by `success`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PREVIEW_CHARS;
use crate::extract::{truncate_chars, Metadata, Section};

/// Outcome of scraping one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeResult {
    Success(ScrapeSuccess),
    Failure(ScrapeFailure),
}

/// Successful scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeSuccess {
    pub url: String,
    pub title: String,
    /// Plain-text rendering of `structured_content`
    pub content: String,
    pub structured_content: Vec<Section>,
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
    /// Always `true`
    pub success: bool,
    pub word_count: usize,
    /// 1-based attempt that succeeded
    pub scraping_attempts: u32,
    /// Whether the content came from a headless render
    pub dynamic_rendered: bool,
}

/// Scrape that exhausted its attempts (or was cancelled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeFailure {
    pub url: String,
    /// Message of the last error
    pub error: String,
    /// Always `false`
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub scraping_attempts: u32,
}

/// Content statistics returned next to a single scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeStats {
    pub content_length: usize,
    pub word_count: usize,
    pub extracted_at: DateTime<Utc>,
}

/// Abbreviated view of a successful scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResult {
    pub url: String,
    pub title: String,
    /// First 800 characters of content, `...`-suffixed when cut
    pub preview: String,
    pub metadata: Metadata,
    pub stats: ScrapeStats,
}

impl ScrapeFailure {
    pub fn new(url: impl Into<String>, error: impl Into<String>, scraping_attempts: u32) -> Self {
        Self {
            url: url.into(),
            error: error.into(),
            success: false,
            timestamp: Utc::now(),
            scraping_attempts,
        }
    }
}

impl ScrapeSuccess {
    pub fn stats(&self) -> ScrapeStats {
        ScrapeStats {
            content_length: self.content.chars().count(),
            word_count: self.word_count,
            extracted_at: self.timestamp,
        }
    }

    pub fn preview(&self) -> PreviewResult {
        let head = truncate_chars(&self.content, PREVIEW_CHARS);
        let preview = if head.len() < self.content.len() {
            format!("{head}...")
        } else {
            head.to_string()
        };
        PreviewResult {
            url: self.url.clone(),
            title: self.title.clone(),
            preview,
            metadata: self.metadata.clone(),
            stats: self.stats(),
        }
    }
}

impl ScrapeResult {
    pub fn url(&self) -> &str {
        match self {
            ScrapeResult::Success(success) => &success.url,
            ScrapeResult::Failure(failure) => &failure.url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeResult::Success(_))
    }

    pub fn scraping_attempts(&self) -> u32 {
        match self {
            ScrapeResult::Success(success) => success.scraping_attempts,
            ScrapeResult::Failure(failure) => failure.scraping_attempts,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ScrapeResult::Success(success) => success.timestamp,
            ScrapeResult::Failure(failure) => failure.timestamp,
        }
    }

    pub fn as_success(&self) -> Option<&ScrapeSuccess> {
        match self {
            ScrapeResult::Success(success) => Some(success),
            ScrapeResult::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&ScrapeFailure> {
        match self {
            ScrapeResult::Success(_) => None,
            ScrapeResult::Failure(failure) => Some(failure),
        }
    }
}

impl From<ScrapeSuccess> for ScrapeResult {
    fn from(success: ScrapeSuccess) -> Self {
        ScrapeResult::Success(success)
    }
}

impl From<ScrapeFailure> for ScrapeResult {
    fn from(failure: ScrapeFailure) -> Self {
        ScrapeResult::Failure(failure)
    }
}
