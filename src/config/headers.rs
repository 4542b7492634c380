//! User-agent pool and request header profiles.
//!
//! The fetch ladder escalates through [`HeaderProfile`]s across attempts. Each
//! profile layers extra headers on top of a browser-like baseline so repeated
//! attempts look like different, plausible visitors.

use rand::seq::IndexedRandom;

use super::constants::FETCH_STRATEGY_COUNT;

/// Desktop and mobile user agents used for both static fetches and headless renders.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
];

/// User agent forced by the third (mobile) profile.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

/// Referer sent by the organic click-through profile.
pub const GOOGLE_REFERER: &str = "https://www.google.com/";

/// Baseline browser-like headers sent on every static fetch.
///
/// `accept-encoding` is left to the HTTP client: it advertises gzip, br and
/// deflate itself and only decompresses responses when it set that header.
pub const BASELINE_HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.9"),
    ("dnt", "1"),
    ("connection", "keep-alive"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
];

/// Picks a user agent uniformly at random from [`USER_AGENTS`].
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// One rung of the fetch strategy ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    /// Baseline browser headers only
    Baseline,
    /// Baseline + Google referer + `Cache-Control: no-cache`
    Referred,
    /// Baseline with a mobile user agent override
    Mobile,
}

impl HeaderProfile {
    /// Profiles in escalation order.
    pub const LADDER: [HeaderProfile; FETCH_STRATEGY_COUNT] = [
        HeaderProfile::Baseline,
        HeaderProfile::Referred,
        HeaderProfile::Mobile,
    ];

    /// Selects the profile for a 1-based attempt index.
    ///
    /// The index is clamped with `min(attempt - 1, 2)`, so every attempt past
    /// the third keeps using the mobile profile and attempt `0` maps to the
    /// baseline.
    pub fn for_attempt(attempt: u32) -> Self {
        let index = (attempt.saturating_sub(1) as usize).min(Self::LADDER.len() - 1);
        Self::LADDER[index]
    }

    /// Headers this profile adds on top of [`BASELINE_HEADERS`].
    pub fn extra_headers(self) -> &'static [(&'static str, &'static str)] {
        match self {
            HeaderProfile::Baseline | HeaderProfile::Mobile => &[],
            HeaderProfile::Referred => &[("referer", GOOGLE_REFERER), ("cache-control", "no-cache")],
        }
    }

    /// The user agent for a request made with this profile.
    ///
    /// Non-mobile profiles draw from the random pool independently of the attempt.
    pub fn user_agent(self) -> &'static str {
        match self {
            HeaderProfile::Mobile => MOBILE_USER_AGENT,
            HeaderProfile::Baseline | HeaderProfile::Referred => random_user_agent(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeaderProfile::Baseline => "baseline",
            HeaderProfile::Referred => "referred",
            HeaderProfile::Mobile => "mobile",
        }
    }
}
