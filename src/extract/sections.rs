//! Content segmentation into typed sections.
//!
//! Segmentation runs in two steps:
//! 1. [`collect_blocks`] walks the content roots in document order and emits
//!    one [`Block`] per heading, paragraph, list, blockquote or `pre` element,
//!    skipping boilerplate subtrees and empty elements.
//! 2. [`fold_blocks`] reduces the block stream into [`Section`]s. Consecutive
//!    paragraphs merge into one section until it would exceed
//!    [`PARAGRAPH_MAX_CHARS`]; headings and other blocks close the open
//!    paragraph.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::config::PARAGRAPH_MAX_CHARS;
use crate::extract::cleaner::is_boilerplate;
use crate::extract::text::{element_text, raw_text};

/// One typed, ordered unit of extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
    /// `<h1>`..`<h6>`
    Heading { level: u8, text: String },
    /// One or more merged `<p>` elements separated by blank lines
    Paragraph { text: String },
    /// `<ul>` items
    BulletList { items: Vec<String> },
    /// `<ol>` items
    NumberedList { items: Vec<String> },
    /// `<blockquote>`
    Quote { text: String },
    /// `<pre>`, whitespace preserved
    Code { text: String },
}

/// A content-bearing element found by the walk, before paragraph folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(u8, String),
    Paragraph(String),
    List { ordered: bool, items: Vec<String> },
    Quote(String),
    Code(String),
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn list_items(list: ElementRef<'_>) -> Vec<String> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li" && !is_boilerplate(*child))
        .map(element_text)
        .filter(|item| !item.is_empty())
        .collect()
}

fn code_text(pre: ElementRef<'_>) -> String {
    let raw = raw_text(pre);
    raw.trim_matches(|c| c == '\n' || c == '\r').trim_end().to_string()
}

/// Walks `root` in document order, appending content blocks.
///
/// Content-bearing elements are not descended into, so a `<p>` inside a
/// `<blockquote>` belongs to the quote and nested lists belong to their item.
pub fn collect_blocks(root: ElementRef<'_>, blocks: &mut Vec<Block>) {
    for child in root.children().filter_map(ElementRef::wrap) {
        if is_boilerplate(child) {
            continue;
        }
        let tag = child.value().name();
        if let Some(level) = heading_level(tag) {
            let text = element_text(child);
            if !text.is_empty() {
                blocks.push(Block::Heading(level, text));
            }
            continue;
        }
        match tag {
            "p" => {
                let text = element_text(child);
                if !text.is_empty() {
                    blocks.push(Block::Paragraph(text));
                }
            }
            "ul" | "ol" => {
                let items = list_items(child);
                if !items.is_empty() {
                    blocks.push(Block::List {
                        ordered: tag == "ol",
                        items,
                    });
                }
            }
            "blockquote" => {
                let text = element_text(child);
                if !text.is_empty() {
                    blocks.push(Block::Quote(text));
                }
            }
            "pre" => {
                let text = code_text(child);
                if !text.trim().is_empty() {
                    blocks.push(Block::Code(text));
                }
            }
            _ => collect_blocks(child, blocks),
        }
    }
}

/// Paragraph accumulator state of the fold.
#[derive(Debug, Default)]
struct SectionFold {
    sections: Vec<Section>,
    open_paragraph: Option<String>,
}

impl SectionFold {
    fn flush(&mut self) {
        if let Some(text) = self.open_paragraph.take() {
            self.sections.push(Section::Paragraph { text });
        }
    }

    fn push_paragraph(&mut self, text: String) {
        match self.open_paragraph.as_mut() {
            Some(open)
                if open.chars().count() + 2 + text.chars().count() <= PARAGRAPH_MAX_CHARS =>
            {
                open.push_str("\n\n");
                open.push_str(&text);
            }
            Some(_) => {
                self.flush();
                self.open_paragraph = Some(text);
            }
            None => self.open_paragraph = Some(text),
        }
    }

    fn push_section(&mut self, section: Section) {
        self.flush();
        self.sections.push(section);
    }

    fn step(mut self, block: Block) -> Self {
        match block {
            Block::Paragraph(text) => self.push_paragraph(text),
            Block::Heading(level, text) => self.push_section(Section::Heading { level, text }),
            Block::List {
                ordered: true,
                items,
            } => self.push_section(Section::NumberedList { items }),
            Block::List {
                ordered: false,
                items,
            } => self.push_section(Section::BulletList { items }),
            Block::Quote(text) => self.push_section(Section::Quote { text }),
            Block::Code(text) => self.push_section(Section::Code { text }),
        }
        self
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush();
        self.sections
    }
}

/// Reduces a block stream into sections, merging runs of paragraphs.
pub fn fold_blocks(blocks: impl IntoIterator<Item = Block>) -> Vec<Section> {
    blocks
        .into_iter()
        .fold(SectionFold::default(), SectionFold::step)
        .finish()
}

/// Segments the given content roots into sections, in document order.
pub fn segment<'a>(roots: impl IntoIterator<Item = ElementRef<'a>>) -> Vec<Section> {
    let mut blocks = Vec::new();
    for root in roots {
        collect_blocks(root, &mut blocks);
    }
    fold_blocks(blocks)
}
