//! Raw-page signals consumed by the render escalation policy.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;

use crate::extract::cleaner::body;
use crate::extract::selector::parse_selector_unsafe;

/// Markers of a client-rendered application shell, checked in this order.
pub const SPA_MARKERS: &[&str] = &[
    "#root",
    "#__next",
    "div#app",
    "div#__nuxt",
    "[data-reactroot]",
];

static SPA_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    SPA_MARKERS
        .iter()
        .map(|marker| (*marker, parse_selector_unsafe(marker, "SPA markers")))
        .collect()
});

/// Tags whose text never reaches the screen.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Facts about the raw HTML, independent of boilerplate removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSignals {
    /// Characters of trimmed `<body>` text, scripts and styles excluded
    pub body_text_length: usize,
    /// First SPA marker found in the body, if any
    pub spa_marker: Option<&'static str>,
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if !INVISIBLE_TAGS.contains(&el.name()) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    push_visible_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Collects [`PageSignals`] for a parsed document.
pub fn page_signals(document: &Html) -> PageSignals {
    let body = body(document);
    let mut text = String::new();
    push_visible_text(body, &mut text);

    let spa_marker = SPA_SELECTORS
        .iter()
        .find(|(_, selector)| body.select(selector).next().is_some())
        .map(|(marker, _)| *marker);

    PageSignals {
        body_text_length: text.trim().chars().count(),
        spa_marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spa_selectors_follow_marker_order() {
        let cached: Vec<&str> = SPA_SELECTORS.iter().map(|(marker, _)| *marker).collect();
        assert_eq!(cached, SPA_MARKERS);
    }

    #[test]
    fn test_body_text_excludes_scripts() {
        let document = Html::parse_document(
            "<html><body><p> Hello </p><script>var x = 'not visible';</script></body></html>",
        );
        let signals = page_signals(&document);
        assert_eq!(signals.body_text_length, 5);
        assert_eq!(signals.spa_marker, None);
    }

    #[test]
    fn test_detects_spa_markers() {
        for (html, expected) in [
            ("<body><div id=\"root\"></div></body>", "#root"),
            ("<body><div id=\"__next\"></div></body>", "#__next"),
            ("<body><div id=\"app\"></div></body>", "div#app"),
            ("<body><div id=\"__nuxt\"></div></body>", "div#__nuxt"),
            ("<body><div data-reactroot=\"\"></div></body>", "[data-reactroot]"),
        ] {
            let document = Html::parse_document(html);
            assert_eq!(page_signals(&document).spa_marker, Some(expected), "{html}");
        }
    }

    #[test]
    fn test_section_with_app_id_is_not_a_marker() {
        let document = Html::parse_document("<body><section id=\"app\">x</section></body>");
        assert_eq!(page_signals(&document).spa_marker, None);
    }
}
