//! PDF serialization of a finished [`Layout`] using printpdf's built-in fonts.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use super::layout::{FontStyle, Layout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error_handling::DocumentError;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, DocumentError> {
        let font = |builtin: BuiltinFont| {
            doc.add_builtin_font(builtin)
                .map_err(|e| DocumentError::Pdf(e.to_string()))
        };
        Ok(Self {
            regular: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            italic: font(BuiltinFont::HelveticaOblique)?,
            mono: font(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
            FontStyle::Mono => &self.mono,
        }
    }
}

/// Writes every laid-out page into a new PDF and returns its bytes.
pub fn write_pdf(layout: &Layout, title: &str) -> Result<Vec<u8>, DocumentError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Content",
    );
    let fonts = Fonts::load(&doc)?;

    for (index, page) in layout.pages().iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Content");
            doc.get_page(page_index).get_layer(layer_index)
        };
        for run in &page.runs {
            if run.text.is_empty() {
                continue;
            }
            layer.use_text(
                run.text.as_str(),
                run.size,
                Mm(run.x),
                Mm(run.y),
                fonts.get(run.style),
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| DocumentError::Pdf(e.to_string()))
}
