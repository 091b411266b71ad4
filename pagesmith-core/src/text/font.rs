use crate::objects::{Dictionary, Object};

/// Standard Type 1 faces a document can reference without embedding.
///
/// Only the sans-serif face is used for text; its widths drive
/// [`measure_text`](crate::text::measure_text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    /// Helvetica (sans-serif)
    #[default]
    Helvetica,
}

impl Font {
    /// PostScript name used for `/BaseFont`.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
        }
    }

    /// Name under which pages declare this font in their resources.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
        }
    }

    pub fn to_pdf_object(&self) -> Object {
        let mut font = Dictionary::new();
        font.set("Type", Object::name("Font"));
        font.set("Subtype", Object::name("Type1"));
        font.set("BaseFont", Object::name(self.pdf_name()));
        Object::Dictionary(font)
    }
}
