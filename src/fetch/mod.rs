//! Fetch strategy ladder.
//!
//! Produces raw HTML for a URL. Each attempt uses the [`HeaderProfile`]
//! selected by `min(attempt - 1, 2)`: baseline browser headers, then a Google
//! referer with `Cache-Control: no-cache`, then a mobile user agent.

mod request;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::config::HeaderProfile;
use crate::error_handling::FetchError;

pub(crate) use request::RequestHeaders;

/// Source of raw page HTML.
///
/// The orchestrator only depends on this trait, so tests can substitute a
/// deterministic fetcher for the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` using the strategy for the 1-based `attempt`.
    async fn fetch(&self, url: &str, attempt: u32) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest::Client`.
///
/// Timeout, redirect limit and decompression come from the client (see
/// [`crate::initialization::init_client`]).
#[derive(Debug, Clone)]
pub struct FetchLadder {
    client: Arc<reqwest::Client>,
}

impl FetchLadder {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

/// Whether a final (post-redirect) status counts as a successful fetch.
pub fn is_accepted_status(status: reqwest::StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}

#[async_trait]
impl PageFetcher for FetchLadder {
    async fn fetch(&self, url: &str, attempt: u32) -> Result<String, FetchError> {
        let profile = HeaderProfile::for_attempt(attempt);
        let user_agent = profile.user_agent();
        debug!(
            "Fetching {} with {} profile (attempt {})",
            url,
            profile.as_str(),
            attempt
        );
        if log::log_enabled!(log::Level::Trace) {
            for (name, value) in RequestHeaders::as_vec(profile, user_agent) {
                log::trace!("  {}: {}", name, value);
            }
        }

        let builder = RequestHeaders::apply_to_request_builder(
            self.client.get(url),
            profile,
            user_agent,
        );
        let response = builder.send().await?;

        let status = response.status();
        if !is_accepted_status(status) {
            debug!("{} answered with status {}", url, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
