//! Boilerplate removal and main-content root selection.
//!
//! The parsed document is never mutated. Instead every walk over the body
//! consults [`is_boilerplate`] and skips denylisted subtrees, which yields the
//! same tree a "clone the body and remove nodes" pass would.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::extract::selector::parse_selector_unsafe;

/// Tags whose whole subtree is never content.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "footer", "header", "aside", "iframe",
    "form", "button", "svg",
];

/// Substrings of `class`, `id` or `role` values that mark page furniture.
const BOILERPLATE_PATTERNS: &[&str] = &[
    "advert",
    "sidebar",
    "menu",
    "nav",
    "social",
    "share",
    "comment",
    "popup",
    "modal",
    "cookie",
    "consent",
    "banner",
    "newsletter",
    "related",
    "recommended",
    "promo",
    "sponsor",
];

/// Bare ad tokens. Matched per class token rather than by substring so that
/// `header`, `shadow` or `download` survive.
const AD_TOKENS: &[&str] = &["ad", "ads"];
const AD_TOKEN_PREFIXES: &[&str] = &["ad-", "ads-", "ad_", "ads_"];

/// Candidate content roots in priority order: semantic tags, then CMS class
/// names, then the ARIA landmark.
const CONTENT_ROOT_SELECTORS: &[&str] = &[
    "main article",
    "article",
    "main",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".article-body",
    ".content-body",
    ".main-content",
    "#content",
    ".content",
    "[role=\"main\"]",
];

static CONTENT_ROOTS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_ROOT_SELECTORS
        .iter()
        .map(|s| parse_selector_unsafe(s, "content root selectors"))
        .collect()
});

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("body", "body selector"));

fn has_ad_token(value: &str) -> bool {
    value.split_whitespace().any(|token| {
        AD_TOKENS.contains(&token) || AD_TOKEN_PREFIXES.iter().any(|p| token.starts_with(p))
    })
}

/// Whether an element (and therefore its whole subtree) is page furniture.
pub fn is_boilerplate(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if BOILERPLATE_TAGS.contains(&value.name()) {
        return true;
    }
    ["class", "id", "role"].iter().any(|attr| {
        value.attr(attr).is_some_and(|raw| {
            let lowered = raw.to_lowercase();
            BOILERPLATE_PATTERNS.iter().any(|p| lowered.contains(p)) || has_ad_token(&lowered)
        })
    })
}

/// Returns the `<body>` element, or the document root for fragments without one.
pub fn body(document: &Html) -> ElementRef<'_> {
    document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element())
}

/// Whether `element` sits inside (or is) a boilerplate subtree below `body`.
fn in_boilerplate(element: ElementRef<'_>, body: ElementRef<'_>) -> bool {
    if is_boilerplate(element) {
        return true;
    }
    element
        .ancestors()
        .take_while(|node| node.id() != body.id())
        .filter_map(ElementRef::wrap)
        .any(is_boilerplate)
}

/// Picks the extraction roots.
///
/// The first selector in [`CONTENT_ROOT_SELECTORS`] that matches at least one
/// non-boilerplate element carrying text wins; nested matches are folded into
/// their outermost match. Falls back to the cleaned body itself.
pub fn content_roots<'a>(body: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    for (selector, source) in CONTENT_ROOTS.iter().zip(CONTENT_ROOT_SELECTORS) {
        let matches: Vec<ElementRef<'a>> = body
            .select(selector)
            .filter(|el| !in_boilerplate(*el, body))
            .filter(|el| !crate::extract::text::element_text(*el).is_empty())
            .collect();
        if matches.is_empty() {
            continue;
        }
        let ids: HashSet<_> = matches.iter().map(|el| el.id()).collect();
        let outermost: Vec<ElementRef<'a>> = matches
            .into_iter()
            .filter(|el| !el.ancestors().any(|node| ids.contains(&node.id())))
            .collect();
        log::debug!(
            "Content root selector '{}' matched {} element(s)",
            source,
            outermost.len()
        );
        return outermost;
    }
    log::debug!("No content root selector matched; using the cleaned body");
    vec![body]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn first<'a>(document: &'a Html, selector: &str) -> ElementRef<'a> {
        let selector = Selector::parse(selector).unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_boilerplate_tags() {
        let document = Html::parse_document(
            "<body><nav>n</nav><footer>f</footer><p>keep</p><script>s</script></body>",
        );
        assert!(is_boilerplate(first(&document, "nav")));
        assert!(is_boilerplate(first(&document, "footer")));
        assert!(is_boilerplate(first(&document, "script")));
        assert!(!is_boilerplate(first(&document, "p")));
    }

    #[test]
    fn test_boilerplate_class_and_role_patterns() {
        let document = Html::parse_document(
            r#"<body>
                <div class="Left-Sidebar">x</div>
                <div id="cookie-notice">x</div>
                <div role="menubar">x</div>
                <div class="ad-slot">x</div>
                <div class="page-header shadow">x</div>
                <ul class="site-nav">x</ul>
            </body>"#,
        );
        assert!(is_boilerplate(first(&document, ".Left-Sidebar")));
        assert!(is_boilerplate(first(&document, "#cookie-notice")));
        assert!(is_boilerplate(first(&document, "[role=menubar]")));
        assert!(is_boilerplate(first(&document, ".ad-slot")));
        assert!(is_boilerplate(first(&document, ".site-nav")));
        // "header"/"shadow" contain "ad" but are not ad tokens
        assert!(!is_boilerplate(first(&document, ".shadow")));
    }

    #[test]
    fn test_content_roots_prefers_article() {
        let document = Html::parse_document(
            "<body><div class=\"content\">side</div><article><p>Main story</p></article></body>",
        );
        let roots = content_roots(body(&document));
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].value().name(), "article");
    }

    #[test]
    fn test_content_roots_ignores_boilerplate_matches() {
        let document = Html::parse_document(
            "<body><aside><article><p>Promo</p></article></aside><div id=\"content\"><p>Real</p></div></body>",
        );
        let roots = content_roots(body(&document));
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].value().attr("id"), Some("content"));
    }

    #[test]
    fn test_content_roots_folds_nested_matches() {
        let document = Html::parse_document(
            "<body><article><p>Outer</p><article><p>Inner</p></article></article></body>",
        );
        let roots = content_roots(body(&document));
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn test_content_roots_falls_back_to_body() {
        let document = Html::parse_document("<body><div><p>Loose text</p></div></body>");
        let roots = content_roots(body(&document));
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].value().name(), "body");
    }
}
