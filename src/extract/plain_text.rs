//! Plain-text rendering of sections, and the inverse segmentation.
//!
//! Rendering rules, one blank line between sections: headings are prefixed
//! with one `#` per level, bullet items with `• `, numbered items with `1. `,
//! quote lines with `> `, and code is wrapped in a triple-backtick fence.
//! Paragraph lines that would read back as one of those markers get a leading
//! backslash, which [`parse_plain_text`] removes again.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::sections::Section;

const BULLET: &str = "• ";
const FENCE: &str = "```";

static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6}) (.+)$").unwrap_or_else(|e| panic!("heading regex: {e}"))
});
static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\. (.*)$").unwrap_or_else(|e| panic!("numbered regex: {e}"))
});

const ESCAPE: char = '\\';

fn looks_like_marker(line: &str) -> bool {
    line.starts_with(['#', '>', ESCAPE])
        || line.starts_with(BULLET)
        || line.starts_with(FENCE)
        || NUMBERED_LINE.is_match(line)
}

fn escape_line(line: &str) -> String {
    if looks_like_marker(line) {
        format!("{ESCAPE}{line}")
    } else {
        line.to_string()
    }
}

fn render_section(section: &Section) -> String {
    match section {
        Section::Heading { level, text } => {
            format!("{} {}", "#".repeat(usize::from(*level)), text)
        }
        Section::Paragraph { text } => text
            .lines()
            .map(escape_line)
            .collect::<Vec<_>>()
            .join("\n"),
        Section::BulletList { items } => items
            .iter()
            .map(|item| format!("{BULLET}{item}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Section::NumberedList { items } => items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n"),
        Section::Quote { text } => text
            .lines()
            .map(|line| format!("> {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Section::Code { text } => format!("{FENCE}\n{text}\n{FENCE}"),
    }
}

/// Renders sections to markup-free plain text.
pub fn generate_plain_text(sections: &[Section]) -> String {
    sections
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

fn classify(lines: &[&str]) -> Section {
    if let [line] = lines {
        if let Some(caps) = HEADING_LINE.captures(line) {
            let level = u8::try_from(caps[1].len()).unwrap_or(6);
            return Section::Heading {
                level,
                text: caps[2].to_string(),
            };
        }
    }
    if lines.iter().all(|line| line.starts_with(BULLET)) {
        return Section::BulletList {
            items: lines
                .iter()
                .map(|line| line[BULLET.len()..].to_string())
                .collect(),
        };
    }
    if lines.iter().all(|line| NUMBERED_LINE.is_match(line)) {
        return Section::NumberedList {
            items: lines
                .iter()
                .filter_map(|line| NUMBERED_LINE.captures(line))
                .map(|caps| caps[1].to_string())
                .collect(),
        };
    }
    if lines.iter().all(|line| line.starts_with('>')) {
        return Section::Quote {
            text: lines
                .iter()
                .map(|line| {
                    line.strip_prefix("> ")
                        .or_else(|| line.strip_prefix('>'))
                        .unwrap_or(*line)
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };
    }
    Section::Paragraph {
        text: lines
            .iter()
            .map(|line| line.strip_prefix(ESCAPE).unwrap_or(*line))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Re-segments plain text produced by [`generate_plain_text`].
///
/// Heading and list boundaries round-trip exactly. Paragraph text may be split
/// differently, since merged paragraphs are separated by blank lines.
pub fn parse_plain_text(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        if line.trim_end() == FENCE && block.is_empty() {
            let mut code: Vec<&str> = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim_end() == FENCE {
                    break;
                }
                code.push(inner);
            }
            sections.push(Section::Code {
                text: code.join("\n"),
            });
            continue;
        }
        if line.trim().is_empty() {
            if !block.is_empty() {
                sections.push(classify(&block));
                block.clear();
            }
            continue;
        }
        block.push(line);
    }
    if !block.is_empty() {
        sections.push(classify(&block));
    }
    sections
}
