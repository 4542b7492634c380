// Shared helpers for the integration tests: fast scraper configs and canned pages.

use std::sync::Arc;
use std::time::Duration;

use page_scraper::initialization::init_client;
use page_scraper::{FetchLadder, Scraper, ScraperConfig};

/// Defaults with retry and pacing delays shrunk to keep tests fast.
pub fn fast_config() -> ScraperConfig {
    ScraperConfig {
        retry_delay: Duration::from_millis(1),
        batch_delay: Duration::from_millis(1),
        request_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

/// Scraper over the real HTTP fetch ladder, without a dynamic renderer.
#[allow(dead_code)] // Not every test file uses every helper
pub fn static_scraper(config: ScraperConfig) -> Scraper {
    let client = init_client(&config).expect("Failed to build HTTP client");
    Scraper::new(Arc::new(FetchLadder::new(client)), None, config)
}

/// A paragraph comfortably above every content threshold.
#[allow(dead_code)]
pub fn long_paragraph() -> String {
    "Structured extraction keeps the article and drops the chrome. "
        .repeat(4)
        .trim()
        .to_string()
}

/// Article page wrapped in navigation and footer boilerplate.
#[allow(dead_code)]
pub fn article_html(title: &str, paragraph: &str) -> String {
    format!(
        r#"<html>
<head>
  <title>{title} | Site</title>
  <meta name="description" content="About {title}">
  <meta property="og:image" content="/img/cover.png">
</head>
<body>
  <nav><a href="/">Home</a><a href="/about">About</a></nav>
  <article>
    <h1>{title}</h1>
    <p>{paragraph}</p>
  </article>
  <footer>Copyright Site Inc.</footer>
</body>
</html>"#
    )
}

pub const SPA_SHELL: &str =
    r#"<html><head><title>App</title></head><body><div id="root"></div></body></html>"#;
