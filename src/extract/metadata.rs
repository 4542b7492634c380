//! Page metadata extraction.
//!
//! Each metadata field is resolved from an ordered list of [`Source`]s; the
//! first source yielding a non-empty value wins.

use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::WORDS_PER_MINUTE;
use crate::extract::selector::parse_selector_with_fallback;
use crate::extract::text::{clean_text, element_text};

/// Language reported when the page declares none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Metadata attached to a successful scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub publish_date: String,
    pub language: String,
    pub site_name: String,
    pub image: String,
    /// Estimated minutes to read, `ceil(word_count / 200)`
    pub reading_time: usize,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            description: String::new(),
            keywords: String::new(),
            author: String::new(),
            publish_date: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            site_name: String::new(),
            image: String::new(),
            reading_time: 0,
        }
    }
}

impl Metadata {
    /// Sets `reading_time` from a word count.
    pub fn set_reading_time(&mut self, word_count: usize) {
        self.reading_time = reading_time(word_count);
    }
}

/// Minutes needed to read `word_count` words at 200 words per minute, rounded up.
pub fn reading_time(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

/// Where a metadata value is read from.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// An attribute of the first element matching a selector
    Attr(&'static str, &'static str),
    /// The cleaned text of the first element matching a selector
    Text(&'static str),
}

impl Source {
    fn selector(self) -> &'static str {
        match self {
            Source::Attr(selector, _) | Source::Text(selector) => selector,
        }
    }

    fn resolve(self, document: &Html) -> Option<String> {
        let attr = match self {
            Source::Attr(_, attr) => Some(attr),
            Source::Text(_) => None,
        };
        let selector = SOURCE_SELECTORS.get(self.selector())?;
        let element = document.select(selector).next()?;
        let value = match attr {
            Some(attr) => clean_text(element.value().attr(attr)?),
            None => element_text(element),
        };
        (!value.is_empty()).then_some(value)
    }
}

const DESCRIPTION: &[Source] = &[
    Source::Attr("meta[name=\"description\"]", "content"),
    Source::Attr("meta[property=\"og:description\"]", "content"),
    Source::Attr("meta[name=\"twitter:description\"]", "content"),
];

const KEYWORDS: &[Source] = &[Source::Attr("meta[name=\"keywords\"]", "content")];

const AUTHOR: &[Source] = &[
    Source::Attr("meta[name=\"author\"]", "content"),
    Source::Attr("meta[property=\"article:author\"]", "content"),
    Source::Text(".author"),
    Source::Text("[rel=\"author\"]"),
];

const PUBLISH_DATE: &[Source] = &[
    Source::Attr("meta[property=\"article:published_time\"]", "content"),
    Source::Attr("meta[name=\"date\"]", "content"),
    Source::Attr("time[datetime]", "datetime"),
    Source::Text("time"),
];

const LANGUAGE: &[Source] = &[
    Source::Attr("html", "lang"),
    Source::Attr("meta[http-equiv=\"content-language\"]", "content"),
];

const SITE_NAME: &[Source] = &[Source::Attr("meta[property=\"og:site_name\"]", "content")];

const IMAGE: &[Source] = &[
    Source::Attr("meta[property=\"og:image\"]", "content"),
    Source::Attr("meta[name=\"twitter:image\"]", "content"),
];

const ALL_SOURCES: &[&[Source]] = &[
    DESCRIPTION,
    KEYWORDS,
    AUTHOR,
    PUBLISH_DATE,
    LANGUAGE,
    SITE_NAME,
    IMAGE,
];

/// Every source selector, parsed once.
static SOURCE_SELECTORS: LazyLock<HashMap<&'static str, Selector>> = LazyLock::new(|| {
    ALL_SOURCES
        .iter()
        .flat_map(|sources| sources.iter())
        .map(|source| {
            let selector = source.selector();
            (selector, parse_selector_with_fallback(selector, "metadata extraction"))
        })
        .collect()
});

fn first_of(document: &Html, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| source.resolve(document))
}

/// Resolves relative image URLs against the page URL.
fn absolutize(value: String, page_url: &str) -> String {
    match url::Url::parse(page_url).and_then(|base| base.join(&value)) {
        Ok(joined) => joined.to_string(),
        Err(_) => value,
    }
}

/// Extracts metadata from a parsed document.
///
/// `reading_time` is left at zero; the orchestrator sets it once the final
/// word count is known.
pub fn extract_metadata(document: &Html, page_url: &str) -> Metadata {
    Metadata {
        description: first_of(document, DESCRIPTION).unwrap_or_default(),
        keywords: first_of(document, KEYWORDS).unwrap_or_default(),
        author: first_of(document, AUTHOR).unwrap_or_default(),
        publish_date: first_of(document, PUBLISH_DATE).unwrap_or_default(),
        language: first_of(document, LANGUAGE).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        site_name: first_of(document, SITE_NAME).unwrap_or_default(),
        image: first_of(document, IMAGE)
            .map(|image| absolutize(image, page_url))
            .unwrap_or_default(),
        reading_time: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_source_selector_is_cached() {
        let total: usize = ALL_SOURCES.iter().map(|sources| sources.len()).sum();
        assert_eq!(SOURCE_SELECTORS.len(), total);
        for source in ALL_SOURCES.iter().flat_map(|sources| sources.iter()) {
            assert!(SOURCE_SELECTORS.contains_key(source.selector()));
        }
    }

    #[test]
    fn test_metadata_defaults_when_absent() {
        let document = Html::parse_document("<html><body><p>x</p></body></html>");
        let metadata = extract_metadata(&document, "https://example.com/");
        assert_eq!(metadata, Metadata::default());
        assert_eq!(metadata.language, "en");
    }

    #[test]
    fn test_metadata_priority_order() {
        let document = Html::parse_document(
            r#"<html lang="fr"><head>
                <meta property="og:description" content="OG description">
                <meta name="description" content="  Plain   description ">
                <meta property="article:author" content="Meta Author">
                <meta property="og:site_name" content="Example Site">
                <meta name="keywords" content="rust, scraping">
            </head><body>
                <span class="author">Byline Author</span>
                <time datetime="2024-03-01T10:00:00Z">March 1</time>
            </body></html>"#,
        );
        let metadata = extract_metadata(&document, "https://example.com/post");
        assert_eq!(metadata.description, "Plain description");
        assert_eq!(metadata.author, "Meta Author");
        assert_eq!(metadata.publish_date, "2024-03-01T10:00:00Z");
        assert_eq!(metadata.language, "fr");
        assert_eq!(metadata.site_name, "Example Site");
        assert_eq!(metadata.keywords, "rust, scraping");
    }

    #[test]
    fn test_empty_source_falls_through() {
        let document = Html::parse_document(
            r#"<html><head><meta name="author" content="   "></head>
               <body><a rel="author">Link Author</a><time>Yesterday</time></body></html>"#,
        );
        let metadata = extract_metadata(&document, "https://example.com/");
        assert_eq!(metadata.author, "Link Author");
        assert_eq!(metadata.publish_date, "Yesterday");
    }

    #[test]
    fn test_relative_image_is_absolutized() {
        let document = Html::parse_document(
            r#"<html><head><meta name="twitter:image" content="/img/cover.png"></head></html>"#,
        );
        let metadata = extract_metadata(&document, "https://example.com/blog/post");
        assert_eq!(metadata.image, "https://example.com/img/cover.png");
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(0), 0);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(201), 2);
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let json = serde_json::to_value(Metadata::default()).unwrap();
        assert!(json.get("publishDate").is_some());
        assert!(json.get("siteName").is_some());
        assert!(json.get("readingTime").is_some());
    }
}
