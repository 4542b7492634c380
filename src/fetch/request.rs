//! HTTP request building for the fetch ladder.

use reqwest::header::{HeaderName, USER_AGENT};

use crate::config::{HeaderProfile, BASELINE_HEADERS};

/// Browser-like request headers, layered per [`HeaderProfile`].
///
/// Every request carries [`BASELINE_HEADERS`]; the profile adds its own
/// headers on top and decides the user agent. Header names are static and
/// lowercase, so they are built with `HeaderName::from_static`.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Returns the full header set for a profile as `(name, value)` pairs.
    ///
    /// The user agent is listed last. Used for debug logging of what was sent.
    pub(crate) fn as_vec(profile: HeaderProfile, user_agent: &str) -> Vec<(String, String)> {
        BASELINE_HEADERS
            .iter()
            .chain(profile.extra_headers())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .chain(std::iter::once((
                USER_AGENT.as_str().to_string(),
                user_agent.to_string(),
            )))
            .collect()
    }

    /// Applies the profile's headers and user agent to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
        profile: HeaderProfile,
        user_agent: &str,
    ) -> reqwest::RequestBuilder {
        BASELINE_HEADERS
            .iter()
            .chain(profile.extra_headers())
            .fold(builder, |builder, (name, value)| {
                builder.header(HeaderName::from_static(*name), *value)
            })
            .header(USER_AGENT, user_agent)
    }
}
