//! Render escalation policy.
//!
//! Static HTML is not enough for client-rendered pages. After static
//! extraction the orchestrator asks [`should_escalate`] whether the page looks
//! thin or like an SPA shell and, if so, hands the URL to a
//! [`DynamicRenderer`] once per invocation.
//!
//! The renderer is an injected, optional capability: `None` simply means
//! escalation is skipped. Render failures never propagate; [`escalate`] turns
//! them into "no dynamic content".

mod chromium;

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::config::ScraperConfig;
use crate::error_handling::RenderError;
use crate::extract::Extraction;

pub use chromium::{ChromiumRenderer, CONTENT_SELECTOR};

/// A headless-browser (or stub) capable of returning fully rendered HTML.
#[async_trait]
pub trait DynamicRenderer: Send + Sync {
    /// Renders `url` and returns the resulting document HTML.
    ///
    /// Implementations must release every browser resource they acquire
    /// before returning, on success and on error alike.
    async fn render(&self, url: &str, cancel: &CancellationToken) -> Result<String, RenderError>;
}

/// Why a page was escalated to dynamic rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscalationReason {
    /// Rendered plain text is shorter than the threshold
    ThinText { length: usize, threshold: usize },
    /// Raw body text is shorter than the threshold
    ThinBody { length: usize, threshold: usize },
    /// Extraction produced no sections
    NoSections,
    /// The body carries a client-side application root
    SpaMarker(&'static str),
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscalationReason::ThinText { length, threshold } => {
                write!(f, "plain text too short ({length} < {threshold})")
            }
            EscalationReason::ThinBody { length, threshold } => {
                write!(f, "body text too short ({length} < {threshold})")
            }
            EscalationReason::NoSections => write!(f, "no structured sections"),
            EscalationReason::SpaMarker(marker) => write!(f, "SPA root marker {marker}"),
        }
    }
}

/// Evaluates the escalation trigger for a static extraction.
///
/// Any one condition is enough. Conditions are checked in a fixed order so the
/// reported reason is stable.
pub fn should_escalate(extraction: &Extraction, config: &ScraperConfig) -> Option<EscalationReason> {
    let text_length = if extraction.is_empty() {
        0
    } else {
        extraction.content.chars().count()
    };
    if text_length < config.escalation_min_text_length {
        return Some(EscalationReason::ThinText {
            length: text_length,
            threshold: config.escalation_min_text_length,
        });
    }
    let body_length = extraction.signals.body_text_length;
    if body_length < config.escalation_min_body_text_length {
        return Some(EscalationReason::ThinBody {
            length: body_length,
            threshold: config.escalation_min_body_text_length,
        });
    }
    if extraction.sections.is_empty() {
        return Some(EscalationReason::NoSections);
    }
    extraction.signals.spa_marker.map(EscalationReason::SpaMarker)
}

/// Runs a dynamic render, degrading every failure to `None`.
pub async fn escalate(
    renderer: &dyn DynamicRenderer,
    url: &str,
    cancel: &CancellationToken,
) -> Option<String> {
    let started = std::time::Instant::now();
    match renderer.render(url, cancel).await {
        Ok(html) => {
            info!(
                "Dynamic render of {} finished in {}ms ({} bytes)",
                url,
                started.elapsed().as_millis(),
                html.len()
            );
            Some(html)
        }
        Err(RenderError::Cancelled) => {
            debug!("Dynamic render of {} cancelled", url);
            None
        }
        Err(e) => {
            warn!("Dynamic render of {} failed, keeping static result: {}", url, e);
            None
        }
    }
}
