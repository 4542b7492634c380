//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::ScraperConfig;

/// Initializes the HTTP client used by the fetch ladder.
///
/// Creates a `reqwest::Client` configured with:
/// - The request timeout from the config
/// - Redirect following limited to `max_redirects` hops
/// - Transparent gzip/deflate/brotli decoding
///
/// No default User-Agent is set: every request carries the one chosen by its
/// header profile.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &ScraperConfig) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(config.request_timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;
    Ok(Arc::new(client))
}
