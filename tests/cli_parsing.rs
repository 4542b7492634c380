//! Tests for CLI subcommand parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use page_scraper::config::{Command, LogFormat, LogLevel, Opt, OutputFormat};

#[test]
fn test_scrape_command_defaults() {
    let opt = Opt::try_parse_from(["page_scraper", "scrape", "https://example.com/"])
        .expect("Should parse scrape command");

    assert_eq!(
        log::LevelFilter::from(opt.log_level.clone()),
        log::LevelFilter::from(LogLevel::Info)
    );
    match opt.log_format {
        LogFormat::Plain => {}
        _ => panic!("Should be Plain format"),
    }
    match opt.command {
        Command::Scrape {
            url,
            format,
            output,
        } => {
            assert_eq!(url, "https://example.com/");
            assert_eq!(format, OutputFormat::Json);
            assert_eq!(output, None);
        }
        _ => panic!("Should parse as Scrape command"),
    }
}

#[test]
fn test_scrape_command_pdf_output() {
    let opt = Opt::try_parse_from([
        "page_scraper",
        "scrape",
        "https://example.com/",
        "--format",
        "pdf",
        "-o",
        "out.pdf",
        "--log-format",
        "json",
    ])
    .expect("Should parse scrape command");

    match opt.command {
        Command::Scrape { format, output, .. } => {
            assert_eq!(format, OutputFormat::Pdf);
            assert_eq!(output, Some(PathBuf::from("out.pdf")));
        }
        _ => panic!("Should parse as Scrape command"),
    }
}

#[test]
fn test_batch_command_parsing() {
    let opt = Opt::try_parse_from([
        "page_scraper",
        "batch",
        "https://a.example/",
        "https://b.example/",
        "--concurrency",
        "4",
    ])
    .expect("Should parse batch command");

    match opt.command {
        Command::Batch {
            urls, concurrency, ..
        } => {
            assert_eq!(urls.len(), 2);
            assert_eq!(concurrency, 4);
        }
        _ => panic!("Should parse as Batch command"),
    }
}

#[test]
fn test_batch_command_default_concurrency() {
    let opt = Opt::try_parse_from(["page_scraper", "batch", "https://a.example/"])
        .expect("Should parse batch command");
    match opt.command {
        Command::Batch { concurrency, .. } => assert_eq!(concurrency, 2),
        _ => panic!("Should parse as Batch command"),
    }
}

#[test]
fn test_batch_requires_urls() {
    assert!(Opt::try_parse_from(["page_scraper", "batch"]).is_err());
}

#[test]
fn test_preview_command_parsing() {
    let opt = Opt::try_parse_from(["page_scraper", "preview", "https://example.com/"])
        .expect("Should parse preview command");
    assert!(matches!(opt.command, Command::Preview { .. }));
}

#[test]
fn test_global_options_build_scraper_config() {
    let opt = Opt::try_parse_from([
        "page_scraper",
        "scrape",
        "https://example.com/",
        "--timeout-seconds",
        "12",
        "--enable-dynamic-rendering",
        "--chrome-path",
        "/usr/bin/chromium",
    ])
    .expect("Should parse global options after the subcommand");

    let config = opt.scraper_config();
    assert_eq!(config.request_timeout, Duration::from_secs(12));
    assert!(config.enable_dynamic_rendering);
    assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    assert_eq!(config.max_attempts, 3);
}

#[test]
fn test_unknown_format_is_rejected() {
    assert!(Opt::try_parse_from([
        "page_scraper",
        "scrape",
        "https://example.com/",
        "--format",
        "docx"
    ])
    .is_err());
}
