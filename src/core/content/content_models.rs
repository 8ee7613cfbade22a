// Minimal Google Docs document model: just enough structure to pull the
// text back out in reading order.

/// A fetched document's body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub content: Vec<StructuralElement>,
}

/// Top-level body element. Tables, section breaks and tables of contents are
/// all `Other`; their text is not extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralElement {
    Paragraph(Vec<ParagraphElement>),
    Other,
}

/// Inline element of a paragraph. Only text runs carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphElement {
    TextRun(String),
    Other,
}

impl Document {
    /// Concatenates every paragraph text run in document order. No separator
    /// is added; paragraph runs already end in `\n` when the source did.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|element| match element {
                StructuralElement::Paragraph(elements) => Some(elements),
                StructuralElement::Other => None,
            })
            .flatten()
            .filter_map(|element| match element {
                ParagraphElement::TextRun(text) => Some(text.as_str()),
                ParagraphElement::Other => None,
            })
            .collect()
    }
}
