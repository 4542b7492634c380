//! Page layout model.
//!
//! Text is laid out into positioned runs on US-Letter pages before anything is
//! handed to the PDF backend. Coordinates are millimetres from the bottom-left
//! corner, matching the backend. Glyph widths are approximated per font
//! family, which is enough to wrap lines inside the margins.

use chrono::NaiveDate;

pub const PAGE_WIDTH_MM: f32 = 215.9;
pub const PAGE_HEIGHT_MM: f32 = 279.4;

const MARGIN_X_MM: f32 = 25.4;
const MARGIN_TOP_MM: f32 = 17.6;
const MARGIN_BOTTOM_MM: f32 = 21.2;
const FOOTER_BASELINE_MM: f32 = 12.0;
const FOOTER_SIZE: f32 = 8.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.35;

/// Built-in font families used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    Mono,
}

impl FontStyle {
    /// Average glyph advance as a fraction of the font size.
    fn advance(self) -> f32 {
        match self {
            FontStyle::Mono => 0.6,
            FontStyle::Bold => 0.55,
            FontStyle::Regular | FontStyle::Italic => 0.5,
        }
    }

    fn char_width_mm(self, size: f32) -> f32 {
        size * PT_TO_MM * self.advance()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: FontStyle,
    /// Font size in points
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// Replaces characters outside the built-in fonts' range.
///
/// Typographic quotes and dashes map to their ASCII forms; anything else
/// non-printable is dropped.
pub fn pdf_safe(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => Some('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => Some('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => Some('-'),
            '\u{2022}' | '\u{00B7}' => Some('*'),
            '\u{00A0}' | '\t' => Some(' '),
            '\u{2026}' => Some('.'),
            c if c.is_ascii() && !c.is_ascii_control() => Some(c),
            _ => None,
        })
        .collect()
}

/// Greedy word wrap to at most `max_chars` per line.
///
/// Words longer than a line are hard-split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if line.is_empty() {
            word.len()
        } else {
            line.len() + 1 + word.len()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Flowing layout over a growing list of pages.
#[derive(Debug, Clone)]
pub struct Layout {
    pages: Vec<Page>,
    /// Distance from the top edge of the current page
    cursor: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: MARGIN_TOP_MM,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn content_width() -> f32 {
        PAGE_WIDTH_MM - 2.0 * MARGIN_X_MM
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * LINE_SPACING
    }

    fn current(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Starts a new page, unless the current one is still blank.
    pub fn new_page(&mut self) {
        if self.current().runs.is_empty() {
            self.cursor = MARGIN_TOP_MM;
            return;
        }
        self.pages.push(Page::default());
        self.cursor = MARGIN_TOP_MM;
    }

    /// Vertical gap; dropped at the top of a page.
    pub fn space(&mut self, mm: f32) {
        if self.cursor > MARGIN_TOP_MM {
            self.cursor += mm;
        }
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor + height > PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM {
            self.pages.push(Page::default());
            self.cursor = MARGIN_TOP_MM;
        }
    }

    fn place(&mut self, text: String, style: FontStyle, size: f32, x: f32) {
        let height = Self::line_height(size);
        self.ensure_room(height);
        let y = PAGE_HEIGHT_MM - self.cursor - size * PT_TO_MM;
        self.current().runs.push(TextRun {
            text,
            style,
            size,
            x,
            y,
        });
        self.cursor += height;
    }

    fn max_chars(style: FontStyle, size: f32, width: f32) -> usize {
        (width / style.char_width_mm(size)).floor() as usize
    }

    /// Wrapped text block, `indent` millimetres in from the left margin.
    pub fn text(&mut self, text: &str, style: FontStyle, size: f32, indent: f32, align: Align) {
        let width = Self::content_width() - indent;
        for line in wrap(&pdf_safe(text), Self::max_chars(style, size, width)) {
            let x = match align {
                Align::Left => MARGIN_X_MM + indent,
                Align::Center => {
                    let line_width = line.chars().count() as f32 * style.char_width_mm(size);
                    MARGIN_X_MM + indent + ((width - line_width) / 2.0).max(0.0)
                }
            };
            self.place(line, style, size, x);
        }
    }

    /// List entry with a hanging indent: continuation lines align after the marker.
    pub fn list_item(&mut self, marker: &str, text: &str, size: f32, indent: f32) {
        let style = FontStyle::Regular;
        let marker_width = (marker.chars().count() + 1) as f32 * style.char_width_mm(size);
        let width = Self::content_width() - indent - marker_width;
        let lines = wrap(&pdf_safe(text), Self::max_chars(style, size, width));
        for (index, line) in lines.into_iter().enumerate() {
            if index == 0 {
                self.place(format!("{marker} {line}"), style, size, MARGIN_X_MM + indent);
            } else {
                self.place(line, style, size, MARGIN_X_MM + indent + marker_width);
            }
        }
    }

    /// Monospaced block keeping its own line breaks; long lines are hard-wrapped.
    pub fn preformatted(&mut self, text: &str, size: f32, indent: f32) {
        let style = FontStyle::Mono;
        let max = Self::max_chars(style, size, Self::content_width() - indent).max(1);
        for raw in pdf_safe_lines(text) {
            let chars: Vec<char> = raw.chars().collect();
            if chars.is_empty() {
                self.place(String::new(), style, size, MARGIN_X_MM + indent);
                continue;
            }
            for chunk in chars.chunks(max) {
                self.place(chunk.iter().collect(), style, size, MARGIN_X_MM + indent);
            }
        }
    }

    /// Second pass: stamps every page with its index and the final page count.
    ///
    /// Must run after all content is laid out.
    pub fn stamp_footers(&mut self, generated_on: NaiveDate) {
        let total = self.pages.len();
        let style = FontStyle::Regular;
        for (index, page) in self.pages.iter_mut().enumerate() {
            let text = footer_text(generated_on, index + 1, total);
            let width = text.chars().count() as f32 * style.char_width_mm(FOOTER_SIZE);
            page.runs.push(TextRun {
                text,
                style,
                size: FOOTER_SIZE,
                x: (PAGE_WIDTH_MM - width) / 2.0,
                y: FOOTER_BASELINE_MM,
            });
        }
    }
}

fn pdf_safe_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| pdf_safe(line.trim_end())).collect()
}

pub fn footer_text(generated_on: NaiveDate, page: usize, total: usize) -> String {
    format!(
        "Generated on {} - Page {} of {}",
        generated_on.format("%Y-%m-%d"),
        page,
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.len() <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap("abcdefghijkl xy", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl xy"]);
    }

    #[test]
    fn test_pdf_safe_maps_typography() {
        assert_eq!(pdf_safe("\u{201C}Hi\u{201D} \u{2014} it\u{2019}s"), "\"Hi\" - it's");
        assert_eq!(pdf_safe("caf\u{e9} \u{1F600}"), "caf ");
    }

    #[test]
    fn test_long_text_flows_onto_new_pages() {
        let mut layout = Layout::new();
        let paragraph = "Layout keeps adding lines until the page is full. ".repeat(400);
        layout.text(&paragraph, FontStyle::Regular, 11.0, 0.0, Align::Left);
        assert!(layout.page_count() > 1);
        for page in layout.pages() {
            for run in &page.runs {
                assert!(run.y >= MARGIN_BOTTOM_MM - 1.0);
                assert!(run.x >= MARGIN_X_MM);
            }
        }
    }

    #[test]
    fn test_footers_carry_final_page_count() {
        let mut layout = Layout::new();
        layout.text("first", FontStyle::Regular, 11.0, 0.0, Align::Left);
        layout.new_page();
        layout.text("second", FontStyle::Regular, 11.0, 0.0, Align::Left);
        layout.new_page();
        layout.text("third", FontStyle::Regular, 11.0, 0.0, Align::Left);
        layout.stamp_footers(date());

        let footers: Vec<&str> = layout
            .pages()
            .iter()
            .map(|p| p.runs.last().unwrap().text.as_str())
            .collect();
        assert_eq!(
            footers,
            vec![
                "Generated on 2024-03-09 - Page 1 of 3",
                "Generated on 2024-03-09 - Page 2 of 3",
                "Generated on 2024-03-09 - Page 3 of 3",
            ]
        );
    }

    #[test]
    fn test_new_page_on_blank_page_is_noop() {
        let mut layout = Layout::new();
        layout.new_page();
        layout.new_page();
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn test_list_item_hanging_indent() {
        let mut layout = Layout::new();
        let item = "word ".repeat(60);
        layout.list_item("-", &item, 11.0, 6.0);
        let runs = &layout.pages()[0].runs;
        assert!(runs.len() > 1);
        assert!(runs[0].text.starts_with("- "));
        assert!(runs[1].x > runs[0].x);
    }

    #[test]
    fn test_centered_text_is_offset() {
        let mut layout = Layout::new();
        layout.text("Title", FontStyle::Bold, 24.0, 0.0, Align::Center);
        let run = &layout.pages()[0].runs[0];
        assert!(run.x > MARGIN_X_MM + 40.0);
    }

    #[test]
    fn test_preformatted_keeps_line_breaks() {
        let mut layout = Layout::new();
        layout.preformatted("fn main() {\n    run();\n}", 9.0, 0.0);
        let texts: Vec<&str> = layout.pages()[0].runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["fn main() {", "    run();", "}"]);
    }
}
