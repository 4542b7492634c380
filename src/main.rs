//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_scraper` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization and Ctrl-C cancellation
//! - Writing JSON or PDF output
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use page_scraper::app::{
    log_batch_statistics, log_single_statistics, validate_batch, validate_url, write_document,
    write_json, SingleResponse,
};
use page_scraper::config::{Command, Opt, OutputFormat};
use page_scraper::initialization::init_logger_with;
use page_scraper::{export_batch, export_single, scrape_many, ScrapeResult, Scraper};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory may set ENABLE_DYNAMIC_RENDERING / CHROME_PATH
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();
    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding scrapes");
            ctrl_c.cancel();
        }
    });

    match run(opt, &cancel).await {
        Ok(true) => Ok(()),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("page_scraper error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Runs the selected command. Returns whether every requested URL succeeded.
async fn run(opt: Opt, cancel: &CancellationToken) -> Result<bool> {
    let config = opt.scraper_config();
    let started = Instant::now();

    match opt.command {
        Command::Scrape {
            url,
            format,
            output,
        } => {
            let url = validate_url(&url)?;
            let scraper = Scraper::connect(config)
                .await
                .context("Failed to initialize scraper")?;
            let result = scraper.scrape(&url, cancel).await;
            log_single_statistics(&result, started.elapsed().as_secs_f64());
            write_single(&result, format, output.as_deref())?;
            Ok(result.is_success())
        }
        Command::Batch {
            urls,
            concurrency,
            format,
            output,
        } => {
            let urls = validate_batch(&urls, concurrency)?;
            let scraper = Scraper::connect(config)
                .await
                .context("Failed to initialize scraper")?;
            let batch = scrape_many(&scraper, &urls, concurrency, cancel).await;
            log_batch_statistics(&batch, started.elapsed().as_secs_f64());
            match format {
                OutputFormat::Json => write_json(&batch, output.as_deref())?,
                OutputFormat::Pdf => {
                    let document = export_batch(&batch).context("Failed to render batch PDF")?;
                    let path = write_document(&document, output.as_deref())?;
                    println!("{}", path.display());
                }
            }
            Ok(batch.summary.failed == 0)
        }
        Command::Preview { url } => {
            let url = validate_url(&url)?;
            let scraper = Scraper::connect(config)
                .await
                .context("Failed to initialize scraper")?;
            let result = scraper.scrape(&url, cancel).await;
            log_single_statistics(&result, started.elapsed().as_secs_f64());
            match result.as_success() {
                Some(success) => write_json(&success.preview(), None)?,
                None => write_json(&SingleResponse::new(&result), None)?,
            }
            Ok(result.is_success())
        }
    }
}

fn write_single(result: &ScrapeResult, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match (format, result) {
        (OutputFormat::Pdf, ScrapeResult::Success(success)) => {
            let document = export_single(success).context("Failed to render PDF")?;
            let path = write_document(&document, output)?;
            println!("{}", path.display());
        }
        (OutputFormat::Pdf, ScrapeResult::Failure(_)) => {
            info!("Nothing to render, printing the failure envelope instead");
            write_json(&SingleResponse::new(result), None)?;
        }
        (OutputFormat::Json, _) => write_json(&SingleResponse::new(result), output)?,
    }
    Ok(())
}
