//! Chromium-based renderer using chromiumoxide.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::{debug, info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::DynamicRenderer;
use crate::config::{random_user_agent, ScraperConfig, RENDER_POLL_INTERVAL};
use crate::error_handling::RenderError;

/// Elements whose presence means the client-side app has rendered content.
pub const CONTENT_SELECTOR: &str =
    "main, article, h1, #content, #root, #__next, div[role=\"main\"], [data-reactroot]";

/// Headless Chromium shared by all renders.
///
/// Each render gets its own browser context and page with its own user
/// agent. Both are torn down before the render returns, so concurrent renders
/// never share cookies or storage.
pub struct ChromiumRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
    selector_timeout: Duration,
    flat_timeout: Duration,
    settle_delay: Duration,
}

impl ChromiumRenderer {
    /// Launches a headless Chromium instance.
    ///
    /// Uses `config.chrome_path` when set and lets chromiumoxide detect the
    /// binary otherwise.
    pub async fn launch(config: &ScraperConfig) -> Result<Self, RenderError> {
        let mut builder = BrowserConfig::builder()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking");
        if let Some(path) = &config.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder.build().map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        info!("Headless Chromium launched for dynamic rendering");
        Ok(Self {
            browser,
            handler,
            navigation_timeout: config.render_navigation_timeout,
            selector_timeout: config.render_selector_timeout,
            flat_timeout: config.render_flat_timeout,
            settle_delay: config.render_settle_delay,
        })
    }

    /// Polls until [`CONTENT_SELECTOR`] matches, or gives up after `selector_timeout`.
    async fn wait_for_content(&self, page: &Page) -> bool {
        let poll = async {
            loop {
                if page.find_element(CONTENT_SELECTOR).await.is_ok() {
                    return;
                }
                tokio::time::sleep(RENDER_POLL_INTERVAL).await;
            }
        };
        tokio::time::timeout(self.selector_timeout, poll).await.is_ok()
    }

    async fn render_page(
        &self,
        page: &Page,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, RenderError> {
        let user_agent = random_user_agent();
        page.set_user_agent(SetUserAgentOverrideParams::new(user_agent))
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RenderError::Cancelled),
            navigation = tokio::time::timeout(self.navigation_timeout, page.goto(url)) => {
                match navigation {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => return Err(RenderError::Navigation(e.to_string())),
                    Err(_) => return Err(RenderError::Timeout(self.navigation_timeout.as_millis())),
                }
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RenderError::Cancelled),
            found = self.wait_for_content(page) => {
                debug!("Content selector {} for {}", if found { "appeared" } else { "timed out" }, url);
            }
            _ = tokio::time::sleep(self.flat_timeout) => {
                debug!("Flat render wait elapsed for {}", url);
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RenderError::Cancelled),
            _ = tokio::time::sleep(self.settle_delay) => {}
        }

        page.content()
            .await
            .map_err(|e| RenderError::Capture(e.to_string()))
    }

    /// Opens a fresh isolated context with a blank page in it.
    async fn open_isolated_page(&self) -> Result<(BrowserContextId, Page), RenderError> {
        let context_id = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?
            .result
            .browser_context_id;

        let mut target = CreateTargetParams::new("about:blank");
        target.browser_context_id = Some(context_id.clone());
        match self.browser.new_page(target).await {
            Ok(page) => Ok((context_id, page)),
            Err(e) => {
                self.dispose_context(context_id).await;
                Err(RenderError::Launch(e.to_string()))
            }
        }
    }

    async fn dispose_context(&self, context_id: BrowserContextId) {
        if let Err(e) = self
            .browser
            .execute(DisposeBrowserContextParams::new(context_id))
            .await
        {
            debug!("Failed to dispose browser context: {}", e);
        }
    }
}

#[async_trait]
impl DynamicRenderer for ChromiumRenderer {
    async fn render(&self, url: &str, cancel: &CancellationToken) -> Result<String, RenderError> {
        let (context_id, page) = self.open_isolated_page().await?;

        let result = self.render_page(&page, url, cancel).await;

        if let Err(e) = page.close().await {
            debug!("Failed to close render page for {}: {}", url, e);
        }
        self.dispose_context(context_id).await;
        result
    }
}

impl Drop for ChromiumRenderer {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
