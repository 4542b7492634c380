//! Output writing for scrape results.

use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::document::ExportedDocument;
use crate::scrape::{ScrapeResult, ScrapeStats};

/// Writer wrapper that treats a closed downstream pipe as success.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                // Downstream command closed the pipe
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// JSON envelope for a single-URL scrape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleResponse<'a> {
    pub success: bool,
    pub data: &'a ScrapeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ScrapeStats>,
}

impl<'a> SingleResponse<'a> {
    pub fn new(result: &'a ScrapeResult) -> Self {
        Self {
            success: result.is_success(),
            data: result,
            stats: result.as_success().map(|success| success.stats()),
        }
    }
}

/// Serializes `value` as pretty JSON to `output`, or stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(IgnoreBrokenPipe::new(io::stdout())),
    };
    serde_json::to_writer_pretty(&mut writer, value).context("Failed to serialize JSON output")?;
    writeln!(writer).context("Failed to write output")?;
    writer.flush().context("Failed to flush output")?;
    if let Some(path) = output {
        info!("Wrote JSON to {}", path.display());
    }
    Ok(())
}

/// Writes a rendered document to `output`, or to its suggested filename in
/// the current directory. Returns the path written.
pub fn write_document(document: &ExportedDocument, output: Option<&Path>) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&document.filename));
    std::fs::write(&path, &document.bytes)
        .with_context(|| format!("Failed to write document: {}", path.display()))?;
    info!(
        "Wrote {} page(s) to {}",
        document.page_count,
        path.display()
    );
    Ok(path)
}
