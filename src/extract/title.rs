//! Title resolution.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::{MAX_TITLE_LENGTH, NO_TITLE};
use crate::extract::selector::parse_selector_with_fallback;
use crate::extract::text::{clean_text, element_text};

/// Title candidates in priority order, with the attribute to read (`None` reads text).
const TITLE_SOURCES: &[(&str, Option<&str>)] = &[
    ("h1", None),
    ("title", None),
    ("meta[property=\"og:title\"]", Some("content")),
    ("meta[name=\"twitter:title\"]", Some("content")),
    (".post-title", None),
    (".entry-title", None),
    (".article-title", None),
    (".page-title", None),
];

static TITLE_SELECTORS: LazyLock<Vec<(Selector, Option<&'static str>)>> = LazyLock::new(|| {
    TITLE_SOURCES
        .iter()
        .map(|(selector, attr)| (parse_selector_with_fallback(selector, "title extraction"), *attr))
        .collect()
});

fn acceptable(candidate: &str) -> bool {
    let length = candidate.chars().count();
    length > 0 && length < MAX_TITLE_LENGTH
}

/// Resolves the page title, or [`NO_TITLE`] when no candidate is usable.
///
/// Every element matching a source is tried before moving to the next source,
/// so an empty first `<h1>` does not hide a later one.
pub fn extract_title(document: &Html) -> String {
    for (selector, attr) in TITLE_SELECTORS.iter() {
        for element in document.select(selector) {
            let candidate = match attr {
                Some(attr) => element.value().attr(attr).map(clean_text).unwrap_or_default(),
                None => element_text(element),
            };
            if acceptable(&candidate) {
                return candidate;
            }
        }
    }
    NO_TITLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_selectors_cached_in_priority_order() {
        assert_eq!(TITLE_SELECTORS.len(), TITLE_SOURCES.len());
        let document = Html::parse_document("<h1>Heading</h1>");
        assert_eq!(document.select(&TITLE_SELECTORS[0].0).count(), 1);
    }

    #[test]
    fn test_h1_wins_over_title_tag() {
        let document = Html::parse_document(
            "<html><head><title>Site | Page</title></head><body><h1> Main\n Heading </h1></body></html>",
        );
        assert_eq!(extract_title(&document), "Main Heading");
    }

    #[test]
    fn test_falls_back_to_title_then_og() {
        let document =
            Html::parse_document("<html><head><title>Tab Title</title></head><body></body></html>");
        assert_eq!(extract_title(&document), "Tab Title");

        let document = Html::parse_document(
            r#"<html><head><meta property="og:title" content="OG Title"></head><body><h1>  </h1></body></html>"#,
        );
        assert_eq!(extract_title(&document), "OG Title");
    }

    #[test]
    fn test_overlong_candidates_are_skipped() {
        let long = "x".repeat(300);
        let html = format!(
            "<html><head><title>Short</title></head><body><h1>{long}</h1></body></html>"
        );
        let document = Html::parse_document(&html);
        assert_eq!(extract_title(&document), "Short");
    }

    #[test]
    fn test_cms_class_fallback_and_sentinel() {
        let document =
            Html::parse_document("<body><div class=\"entry-title\">Entry</div></body>");
        assert_eq!(extract_title(&document), "Entry");

        let document = Html::parse_document("<body><p>nothing</p></body>");
        assert_eq!(extract_title(&document), NO_TITLE);
    }
}
