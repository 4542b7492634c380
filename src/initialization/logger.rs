//! Logger initialization.
//!
//! Plain output is meant for a terminal following a scrape; JSON output emits
//! one object per line for log shippers.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};
use serde_json::json;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies that are chatty at the levels this crate logs at.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    // chromiumoxide reports every unparsed CDP event at error level
    ("chromiumoxide", LevelFilter::Off),
    ("tungstenite", LevelFilter::Warn),
];

/// Drops the crate prefix from a log target: `page_scraper::scrape` -> `scrape`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix("page_scraper::")
        .unwrap_or(target)
}

fn json_line(timestamp_ms: i64, level: Level, target: &str, message: &str) -> String {
    json!({
        "ts": timestamp_ms,
        "level": level.as_str(),
        "target": short_target(target),
        "msg": message,
    })
    .to_string()
}

fn level_marker(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then applies to this crate and as the
/// default for everything not listed in the quiet-module table.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug page_scraper scrape https://example.com
/// RUST_LOG=page_scraper=debug,chromiumoxide=info page_scraper batch https://a.example https://b.example
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for (module, filter) in QUIET_MODULES {
        builder.filter_module(module, *filter);
    }
    builder.filter_module("page_scraper", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let (emoji, level) = level_marker(record.level());
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    short_target(record.target()).cyan(),
                    level,
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("page_scraper::scrape"), "scrape");
        assert_eq!(short_target("page_scraper::render::chromium"), "render::chromium");
        assert_eq!(short_target("reqwest::connect"), "reqwest::connect");
    }

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(1_700_000_000_000, Level::Warn, "page_scraper::batch", "say \"hi\"\n");
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["ts"], 1_700_000_000_000_i64);
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["target"], "batch");
        assert_eq!(parsed["msg"], "say \"hi\"\n");
    }

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        let first = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        // At most one of these can install the global logger
        assert!(first.is_err() || second.is_err());
    }
}
