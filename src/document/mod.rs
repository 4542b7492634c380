//! Document renderer.
//!
//! Maps scrape results onto paginated PDF output. Layout happens first, into
//! an in-memory page model; footers carrying "Page i of N" are stamped in a
//! second pass once the page count is final, and only then is the model
//! serialized.

mod layout;
mod pdf;

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

use crate::batch::BatchResult;
use crate::error_handling::DocumentError;
use crate::extract::Section;
use crate::scrape::{ScrapeResult, ScrapeSuccess};

pub use layout::{footer_text, pdf_safe, wrap, Align, FontStyle, Layout, Page, TextRun};

const TITLE_SIZE: f32 = 24.0;
const META_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;
const CODE_SIZE: f32 = 9.0;
const URL_SIZE: f32 = 9.0;
const PARAGRAPH_INDENT_MM: f32 = 4.0;
const LIST_INDENT_MM: f32 = 8.0;
const CODE_INDENT_MM: f32 = 6.0;
const FILENAME_MAX_CHARS: usize = 50;
const FALLBACK_FILENAME: &str = "scraped-content";

/// A rendered document ready to be written out.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub page_count: usize,
}

/// Heading size in points: larger for lower levels, never below body size.
pub fn heading_size(level: u8) -> f32 {
    (22.0 - 2.0 * f32::from(level)).max(BODY_SIZE)
}

/// Title-derived filename: ASCII alphanumerics and spaces kept, whitespace
/// runs turned into `_`, lowercased and cut to 50 characters.
pub fn suggested_filename(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let stem: String = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .take(FILENAME_MAX_CHARS)
        .collect();
    if stem.is_empty() {
        format!("{FALLBACK_FILENAME}.pdf")
    } else {
        format!("{stem}.pdf")
    }
}

pub fn batch_filename(processed_at: DateTime<Utc>) -> String {
    format!("batch-scrape-{}.pdf", processed_at.format("%Y%m%d-%H%M%S"))
}

/// Renders a publish date as `YYYY-MM-DD` when it parses, verbatim otherwise.
fn display_date(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Lays out sections with their typographic rules.
pub fn layout_sections(layout: &mut Layout, sections: &[Section]) {
    for section in sections {
        match section {
            Section::Heading { level, text } => {
                layout.space(4.0);
                layout.text(text, FontStyle::Bold, heading_size(*level), 0.0, Align::Left);
                layout.space(1.5);
            }
            Section::Paragraph { text } => {
                for paragraph in text.split("\n\n").filter(|p| !p.trim().is_empty()) {
                    layout.text(
                        paragraph,
                        FontStyle::Regular,
                        BODY_SIZE,
                        PARAGRAPH_INDENT_MM,
                        Align::Left,
                    );
                    layout.space(2.5);
                }
            }
            Section::BulletList { items } => {
                for item in items {
                    layout.list_item("-", item, BODY_SIZE, LIST_INDENT_MM);
                }
                layout.space(2.5);
            }
            Section::NumberedList { items } => {
                for (index, item) in items.iter().enumerate() {
                    layout.list_item(&format!("{}.", index + 1), item, BODY_SIZE, LIST_INDENT_MM);
                }
                layout.space(2.5);
            }
            Section::Quote { text } => {
                layout.space(1.5);
                layout.text(text, FontStyle::Italic, BODY_SIZE, LIST_INDENT_MM, Align::Center);
                layout.space(3.0);
            }
            Section::Code { text } => {
                layout.space(1.5);
                layout.preformatted(text, CODE_SIZE, CODE_INDENT_MM);
                layout.space(3.0);
            }
        }
    }
}

/// Body of one scrape: its sections, or its plain content when none were kept.
fn layout_body(layout: &mut Layout, result: &ScrapeSuccess) {
    if result.structured_content.is_empty() {
        for paragraph in result.content.split("\n\n").filter(|p| !p.trim().is_empty()) {
            layout.text(paragraph, FontStyle::Regular, BODY_SIZE, PARAGRAPH_INDENT_MM, Align::Left);
            layout.space(2.5);
        }
    } else {
        layout_sections(layout, &result.structured_content);
    }
}

/// Lays out a single scrape: centered title block, then its content.
pub fn layout_single(result: &ScrapeSuccess, generated_on: NaiveDate) -> Layout {
    let mut layout = Layout::new();
    layout.text(&result.title, FontStyle::Bold, TITLE_SIZE, 0.0, Align::Center);
    layout.space(3.0);
    if !result.metadata.author.is_empty() {
        let line = format!("Author: {}", result.metadata.author);
        layout.text(&line, FontStyle::Regular, META_SIZE, 0.0, Align::Center);
    }
    if !result.metadata.publish_date.is_empty() {
        let line = format!("Published: {}", display_date(&result.metadata.publish_date));
        layout.text(&line, FontStyle::Regular, META_SIZE, 0.0, Align::Center);
    }
    layout.space(8.0);
    layout_body(&mut layout, result);
    layout.stamp_footers(generated_on);
    layout
}

/// Lays out a batch: cover page, table of contents, one part per success,
/// then a summary of failures.
pub fn layout_batch(batch: &BatchResult, generated_on: NaiveDate) -> Layout {
    let mut layout = Layout::new();
    let summary = &batch.summary;

    layout.space(40.0);
    layout.text("Batch Scrape Report", FontStyle::Bold, TITLE_SIZE, 0.0, Align::Center);
    layout.space(8.0);
    for line in [
        format!("Total URLs: {}", summary.total),
        format!("Successful: {}", summary.successful),
        format!("Failed: {}", summary.failed),
        format!("Total words: {}", summary.total_words),
        format!("Processed: {}", batch.processed_at.format("%Y-%m-%d %H:%M UTC")),
    ] {
        layout.text(&line, FontStyle::Regular, META_SIZE, 0.0, Align::Center);
    }

    let successes: Vec<&ScrapeSuccess> = batch
        .results
        .iter()
        .filter_map(ScrapeResult::as_success)
        .collect();

    if !successes.is_empty() {
        layout.new_page();
        layout.text("Table of Contents", FontStyle::Bold, heading_size(2), 0.0, Align::Left);
        layout.space(4.0);
        for (index, success) in successes.iter().enumerate() {
            let entry = format!("{}. {}", index + 1, success.title);
            layout.text(&entry, FontStyle::Regular, BODY_SIZE, 0.0, Align::Left);
            layout.text(&success.url, FontStyle::Italic, URL_SIZE, LIST_INDENT_MM, Align::Left);
            layout.space(2.0);
        }
    }

    for success in &successes {
        layout.new_page();
        layout.text(&success.title, FontStyle::Bold, heading_size(1), 0.0, Align::Left);
        layout.text(&success.url, FontStyle::Italic, URL_SIZE, 0.0, Align::Left);
        layout.space(6.0);
        layout_body(&mut layout, success);
    }

    let failures: Vec<_> = batch
        .results
        .iter()
        .filter_map(ScrapeResult::as_failure)
        .collect();
    if !failures.is_empty() {
        layout.new_page();
        layout.text("Failed URLs", FontStyle::Bold, heading_size(2), 0.0, Align::Left);
        layout.space(4.0);
        for failure in failures {
            layout.text(&failure.url, FontStyle::Regular, BODY_SIZE, 0.0, Align::Left);
            let error = format!("Error: {}", failure.error);
            layout.text(&error, FontStyle::Italic, URL_SIZE + 1.0, LIST_INDENT_MM, Align::Left);
            layout.space(2.0);
        }
    }

    layout.stamp_footers(generated_on);
    layout
}

/// Exports one successful scrape as a PDF.
pub fn export_single(result: &ScrapeSuccess) -> Result<ExportedDocument, DocumentError> {
    let layout = layout_single(result, Utc::now().date_naive());
    let bytes = pdf::write_pdf(&layout, &pdf_safe(&result.title))?;
    debug!(
        "Rendered {} into {} page(s), {} bytes",
        result.url,
        layout.page_count(),
        bytes.len()
    );
    Ok(ExportedDocument {
        bytes,
        filename: suggested_filename(&result.title),
        page_count: layout.page_count(),
    })
}

/// Exports a whole batch as one PDF.
pub fn export_batch(batch: &BatchResult) -> Result<ExportedDocument, DocumentError> {
    let layout = layout_batch(batch, Utc::now().date_naive());
    let bytes = pdf::write_pdf(&layout, "Batch Scrape Report")?;
    debug!(
        "Rendered batch of {} into {} page(s), {} bytes",
        batch.summary.total,
        layout.page_count(),
        bytes.len()
    );
    Ok(ExportedDocument {
        bytes,
        filename: batch_filename(batch.processed_at),
        page_count: layout.page_count(),
    })
}
