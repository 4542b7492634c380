//! Configuration types and CLI options.
//!
//! This module defines the library-level [`ScraperConfig`] and the enums and
//! structs used for command-line argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::*;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Output format for scrape results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON envelope (default)
    Json,
    /// Paginated PDF document
    Pdf,
}

/// Library configuration (no CLI dependencies).
///
/// Every threshold and delay used by the pipeline lives here so callers and
/// tests can tune them. The defaults reproduce the constants in
/// [`crate::config`].
///
/// # Examples
///
/// ```no_run
/// use page_scraper::ScraperConfig;
/// use std::time::Duration;
///
/// let config = ScraperConfig {
///     retry_delay: Duration::from_millis(500),
///     enable_dynamic_rendering: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Attempts per URL before the failure envelope is returned
    pub max_attempts: u32,
    /// Linear backoff base; the wait after attempt `n` is `n * retry_delay`
    pub retry_delay: Duration,
    /// Pause between consecutive batches
    pub batch_delay: Duration,
    /// Static fetch timeout
    pub request_timeout: Duration,
    /// Redirect hops followed by the HTTP client
    pub max_redirects: usize,
    /// Minimum accepted content length for static results
    pub min_content_length: usize,
    /// Minimum accepted content length once dynamic rendering was used
    pub min_dynamic_content_length: usize,
    /// Escalate when rendered plain text is shorter than this
    pub escalation_min_text_length: usize,
    /// Escalate when raw body text is shorter than this
    pub escalation_min_body_text_length: usize,
    /// Cap on the content carried in a result
    pub max_content_length: usize,
    /// Whether to bring up the headless browser at all
    pub enable_dynamic_rendering: bool,
    /// Headless navigation timeout
    pub render_navigation_timeout: Duration,
    /// Wait for a content selector after navigation
    pub render_selector_timeout: Duration,
    /// Flat timeout raced against the selector wait
    pub render_flat_timeout: Duration,
    /// Hydration settle delay before capturing HTML
    pub render_settle_delay: Duration,
    /// Optional explicit Chromium binary
    pub chrome_path: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            retry_delay: RETRY_BASE_DELAY,
            batch_delay: BATCH_DELAY,
            request_timeout: REQUEST_TIMEOUT,
            max_redirects: MAX_REDIRECT_HOPS,
            min_content_length: MIN_CONTENT_LENGTH,
            min_dynamic_content_length: MIN_DYNAMIC_CONTENT_LENGTH,
            escalation_min_text_length: ESCALATION_MIN_TEXT_LENGTH,
            escalation_min_body_text_length: ESCALATION_MIN_BODY_TEXT_LENGTH,
            max_content_length: MAX_CONTENT_LENGTH,
            enable_dynamic_rendering: false,
            render_navigation_timeout: RENDER_NAVIGATION_TIMEOUT,
            render_selector_timeout: RENDER_SELECTOR_TIMEOUT,
            render_flat_timeout: RENDER_FLAT_TIMEOUT,
            render_settle_delay: RENDER_SETTLE_DELAY,
            chrome_path: None,
        }
    }
}

impl ScraperConfig {
    /// Content threshold for validation, depending on whether a dynamic render was used.
    pub fn content_threshold(&self, dynamic_rendered: bool) -> usize {
        if dynamic_rendered {
            self.min_dynamic_content_length
        } else {
            self.min_content_length
        }
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "page_scraper",
    version,
    about = "Extract readable, structured content from web pages"
)]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,

    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    /// Escalate thin or JavaScript-rendered pages to a headless browser
    ///
    /// The environment switch accepts `1`/`yes`/`on`; `0`, `no`, `off`,
    /// `false` and empty turn it off.
    #[arg(
        long,
        env = "ENABLE_DYNAMIC_RENDERING",
        global = true,
        value_parser = FalseyValueParser::new()
    )]
    pub enable_dynamic_rendering: bool,

    /// Path to a Chromium/Chrome binary (auto-detected when omitted)
    #[arg(long, env = "CHROME_PATH", global = true)]
    pub chrome_path: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT.as_secs(), global = true)]
    pub timeout_seconds: u64,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape a single URL
    Scrape {
        /// URL to scrape
        url: String,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Write output to this path instead of stdout (PDF defaults to a title-derived name)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Scrape several URLs in paced, fixed-size batches
    Batch {
        /// URLs to scrape (at most 20)
        #[arg(required = true)]
        urls: Vec<String>,
        /// URLs scraped concurrently per batch (1-5)
        #[arg(long, short, default_value_t = DEFAULT_BATCH_CONCURRENCY)]
        concurrency: usize,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Write output to this path instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Scrape a URL and print a short content preview
    Preview {
        /// URL to preview
        url: String,
    },
}

impl Opt {
    /// Builds the library configuration from parsed options.
    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            enable_dynamic_rendering: self.enable_dynamic_rendering,
            chrome_path: self.chrome_path.clone(),
            request_timeout: Duration::from_secs(self.timeout_seconds),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = ScraperConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_millis(2000));
        assert_eq!(config.batch_delay, Duration::from_millis(3000));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.min_content_length, 100);
        assert_eq!(config.min_dynamic_content_length, 40);
        assert_eq!(config.escalation_min_text_length, 150);
        assert_eq!(config.escalation_min_body_text_length, 350);
        assert_eq!(config.max_content_length, 50_000);
        assert!(!config.enable_dynamic_rendering);
    }

    #[test]
    fn test_content_threshold_lowered_for_dynamic() {
        let config = ScraperConfig::default();
        assert_eq!(config.content_threshold(false), 100);
        assert_eq!(config.content_threshold(true), 40);
    }

    #[test]
    fn test_opt_parses_batch_command() {
        let opt = Opt::try_parse_from([
            "page_scraper",
            "batch",
            "https://a.example",
            "https://b.example",
            "--concurrency",
            "3",
        ])
        .expect("batch args should parse");
        match opt.command {
            Command::Batch {
                urls,
                concurrency,
                format,
                ..
            } => {
                assert_eq!(urls.len(), 2);
                assert_eq!(concurrency, 3);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("expected batch command, got {other:?}"),
        }
    }

    #[test]
    fn test_opt_scraper_config_carries_flags() {
        let opt = Opt::try_parse_from([
            "page_scraper",
            "--enable-dynamic-rendering",
            "--timeout-seconds",
            "12",
            "scrape",
            "https://example.com",
        ])
        .expect("scrape args should parse");
        let config = opt.scraper_config();
        assert!(config.enable_dynamic_rendering);
        assert_eq!(config.request_timeout, Duration::from_secs(12));
    }
}
