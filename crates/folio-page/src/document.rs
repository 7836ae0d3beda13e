//! Parsed HTML documents.
//!
//! Parsing is best-effort HTML5 and never fails, so any page text can be
//! turned into a [`Document`].

/// Parsed document tree of a page.
pub type Document = scraper::Html;

/// Parse `text` into a document.
#[must_use]
pub fn string_to_document(text: &str) -> Document {
    scraper::Html::parse_document(text)
}

/// Serialize a document, doctype included when the tree has one.
#[must_use]
pub fn document_to_string(document: &Document) -> String {
    document.html()
}
