//! Content extraction.
//!
//! Turns raw HTML into a title, ordered [`Section`]s, [`Metadata`] and the
//! plain-text content carried by a scrape result. Extraction is synchronous and
//! deterministic: the same HTML and URL always yield the same [`Extraction`].
//!
//! `scraper::Html` is not `Send`, so the parsed document never outlives
//! [`extract_page`]; only owned results cross await points.

mod cleaner;
mod metadata;
mod plain_text;
mod sections;
mod selector;
mod signals;
mod text;
mod title;

use scraper::Html;

pub use metadata::{extract_metadata, reading_time, Metadata, DEFAULT_LANGUAGE};
pub use plain_text::{generate_plain_text, parse_plain_text};
pub use sections::{fold_blocks, Block, Section};
pub use signals::{page_signals, PageSignals, SPA_MARKERS};
pub use text::{clean_text, count_words, truncate_chars};
pub use title::extract_title;

pub(crate) use selector::parse_selector_unsafe;

use crate::config::{FALLBACK_MIN_CONTENT_LENGTH, FALLBACK_MIN_PARAGRAPH_LENGTH, NO_CONTENT};

/// Everything extracted from one HTML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Resolved title, or the "No title found" sentinel
    pub title: String,
    /// Structured content in document order
    pub sections: Vec<Section>,
    /// Metadata with `reading_time` derived from `word_count`
    pub metadata: Metadata,
    /// Normalized plain text, or the "No content found" sentinel
    pub content: String,
    /// Words of prose in the content
    pub word_count: usize,
    /// Raw-page facts for the escalation policy
    pub signals: PageSignals,
}

impl Extraction {
    /// Whether the content is the "nothing usable" sentinel.
    pub fn is_empty(&self) -> bool {
        self.content == NO_CONTENT
    }
}

/// Words of the prose carried by the sections.
///
/// Headings are labels rather than prose and are not counted, nor are the
/// list and quote markers added by plain-text rendering.
fn prose_word_count(sections: &[Section]) -> usize {
    sections
        .iter()
        .map(|section| match section {
            Section::Heading { .. } => 0,
            Section::Paragraph { text } | Section::Quote { text } | Section::Code { text } => {
                count_words(text)
            }
            Section::BulletList { items } | Section::NumberedList { items } => {
                items.iter().map(|item| count_words(item)).sum()
            }
        })
        .sum()
}

/// Content used when the structured sections render to nothing: long
/// paragraphs first, then all root text.
fn fallback_content(roots: &[scraper::ElementRef<'_>]) -> Option<String> {
    let paragraph = parse_selector_unsafe("p", "paragraph fallback");
    let paragraphs: Vec<String> = roots
        .iter()
        .flat_map(|root| root.select(&paragraph))
        .map(text::element_text)
        .filter(|p| p.chars().count() > FALLBACK_MIN_PARAGRAPH_LENGTH)
        .collect();
    let combined = paragraphs.join("\n\n");
    if combined.chars().count() > FALLBACK_MIN_CONTENT_LENGTH {
        log::debug!("Using paragraph fallback content");
        return Some(combined);
    }

    let root_text = roots
        .iter()
        .map(|root| text::element_text(*root))
        .collect::<Vec<_>>()
        .join("\n\n");
    if root_text.chars().count() > FALLBACK_MIN_CONTENT_LENGTH {
        log::debug!("Using root text fallback content");
        return Some(root_text);
    }
    None
}

/// Extracts title, sections, metadata and content from raw HTML.
///
/// Content is the plain-text rendering of the sections. When that is empty,
/// the paragraph and root-text fallbacks are tried; if neither clears the
/// fallback threshold the content is the "No content found" sentinel. The
/// result is whitespace-normalized and capped at `max_content_length`
/// characters.
pub fn extract_page(html: &str, page_url: &str, max_content_length: usize) -> Extraction {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let signals = page_signals(&document);
    let body = cleaner::body(&document);
    let roots = cleaner::content_roots(body);
    let sections = sections::segment(roots.iter().copied());

    let rendered = generate_plain_text(&sections);
    let (content, word_count) = if !rendered.is_empty() {
        let content = text::normalize_content(&rendered, max_content_length);
        (content, prose_word_count(&sections))
    } else {
        match fallback_content(&roots) {
            Some(fallback) => {
                let content = text::normalize_content(&fallback, max_content_length);
                let words = count_words(&content);
                (content, words)
            }
            None => (NO_CONTENT.to_string(), 0),
        }
    };

    let mut metadata = extract_metadata(&document, page_url);
    metadata.set_reading_time(word_count);

    log::debug!(
        "Extracted {} section(s), {} character(s) of content from {}",
        sections.len(),
        content.chars().count(),
        page_url
    );

    Extraction {
        title,
        sections,
        metadata,
        content,
        word_count,
        signals,
    }
}
