//! Text cleaning helpers shared by the extractor.

use scraper::{ElementRef, Node};

use crate::extract::cleaner::is_boilerplate;

/// Collapses runs of whitespace into single spaces, drops control characters
/// and trims the result.
pub fn clean_text(text: &str) -> String {
    let without_controls: String = text
        .chars()
        .map(|c| if c.is_control() && !c.is_whitespace() { ' ' } else { c })
        .collect();
    without_controls
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw text of an element, skipping boilerplate descendants (scripts, ads, ...).
///
/// Whitespace is preserved exactly as in the source.
pub fn raw_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    if !is_boilerplate(child_element) {
                        push_text(child_element, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Cleaned text of an element with boilerplate descendants removed.
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&raw_text(element))
}

/// Counts whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncates to at most `max_chars` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Normalizes extracted content: trailing spaces are stripped from every line,
/// runs of blank lines collapse to one, tabs become spaces, and the result is
/// trimmed and capped at `max_chars` characters.
pub fn normalize_content(content: &str, max_chars: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;
    for line in content.lines() {
        let line = line.replace('\t', " ");
        let line = line.trim_end();
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        lines.push(line.to_string());
    }
    let joined = lines.join("\n");
    truncate_chars(joined.trim(), max_chars).to_string()
}
