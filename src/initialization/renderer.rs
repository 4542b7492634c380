//! Dynamic renderer initialization.

use std::sync::Arc;

use log::{info, warn};

use crate::config::ScraperConfig;
use crate::render::{ChromiumRenderer, DynamicRenderer};

/// Brings up the headless renderer when dynamic rendering is enabled.
///
/// Returns `None` when rendering is disabled or the browser cannot be
/// launched. A launch failure is logged and otherwise ignored: the scraper
/// keeps working with static fetches only.
pub async fn init_renderer(config: &ScraperConfig) -> Option<Arc<dyn DynamicRenderer>> {
    if !config.enable_dynamic_rendering {
        info!("Dynamic rendering disabled; static fetches only");
        return None;
    }
    match ChromiumRenderer::launch(config).await {
        Ok(renderer) => Some(Arc::new(renderer)),
        Err(e) => {
            warn!(
                "Failed to initialize dynamic rendering: {}. Continuing with static fetches only.",
                e
            );
            None
        }
    }
}
