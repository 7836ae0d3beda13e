//! In-memory unit of site output.
//!
//! A [`Page`] holds its body in one of two private slots: raw [`Content`]
//! (bytes or text) or a parsed [`Document`]. At most one slot is filled at
//! a time. Reading a form that isn't cached converts from the other slot,
//! caches the result and evicts the source:
//!
//! - `content`/`text`/`bytes` serialize a cached document back to text
//! - `document` parses the current text
//!
//! Writing any form clears the other slot, so a stale tree is never
//! returned after the text changed (and the other way around).

use std::borrow::Cow;
use std::fmt;

use crate::content::Content;
use crate::data::{Data, PageId, RawData};
use crate::document::{Document, document_to_string, string_to_document};
use crate::error::DataError;
use crate::src::Src;
use crate::url;

/// One unit of site output.
pub struct Page {
    id: PageId,
    /// Where the content comes from.
    pub src: Src,
    /// Resolved data; `data.page` is this page's id.
    pub data: Data,
    /// Verbatim copy of a source file rather than rendered output.
    pub is_copy: bool,
    raw: Option<Content>,
    document: Option<Document>,
}

impl Page {
    /// Create an empty page with default data.
    ///
    /// Pass `None` for a generated page (empty path and extension).
    #[must_use]
    pub fn new(src: Option<Src>) -> Self {
        let id = PageId::next();
        Self {
            id,
            src: src.unwrap_or_default(),
            data: Data {
                page: id,
                ..Data::default()
            },
            is_copy: false,
            raw: None,
            document: None,
        }
    }

    /// Create a page from authored data.
    ///
    /// The data is finalized with [`RawData::into_data`], which derives
    /// `basename` from the URL and drops a trailing `index.html`. An inline
    /// `content` value is coerced with [`Content::from_value`] and assigned
    /// through [`Page::set_content`].
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if `url` is missing or not a literal string.
    pub fn create(data: RawData, src: Option<Src>) -> Result<Self, DataError> {
        let content = data.content.as_ref().and_then(Content::from_value);
        let mut page = Self::new(src);
        page.data = data.into_data(page.id)?;
        page.set_content(content);
        Ok(page)
    }

    /// Identity of this page, as stored in `data.page`.
    #[must_use]
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Clone this page's source into a new page carrying `data`.
    ///
    /// With an index, `[index]` is appended to the clone's `src.path` so
    /// paginated siblings stay distinguishable. `data.page` is pointed at
    /// the clone. Content is not copied.
    #[must_use]
    pub fn duplicate(&self, index: Option<usize>, mut data: Data) -> Self {
        let mut page = Self::new(Some(self.src.clone()));
        if let Some(index) = index {
            page.src.path = format!("{}[{index}]", page.src.path);
        }
        data.page = page.id;
        page.data = data;
        page
    }

    /// File path this page is written to, derived from `data.url`.
    #[must_use]
    pub fn output_path(&self) -> String {
        url::output_path(&self.data.url)
    }

    /// `src.path + src.ext`, or `"(generated)"`.
    #[must_use]
    pub fn source_path(&self) -> String {
        self.src.source_path()
    }

    /// Raw content, serializing a cached document first if there is one.
    pub fn content(&mut self) -> Option<&Content> {
        if let Some(document) = self.document.take() {
            self.raw = Some(Content::Text(document_to_string(&document)));
        }
        self.raw.as_ref()
    }

    /// Replace the raw content; `None` clears it. Drops any cached document.
    pub fn set_content(&mut self, content: Option<Content>) {
        self.document = None;
        self.raw = content;
    }

    /// Content as text. Bytes are decoded as UTF-8 (lossy); no content is `""`.
    pub fn text(&mut self) -> Cow<'_, str> {
        match self.content() {
            Some(Content::Bytes(bytes)) => String::from_utf8_lossy(bytes),
            Some(Content::Text(text)) => Cow::Borrowed(text),
            None => Cow::Borrowed(""),
        }
    }

    /// Replace the content with text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.set_content(Some(Content::Text(text.into())));
    }

    /// Content as bytes. Text is UTF-8 encoded; no content is empty.
    pub fn bytes(&mut self) -> Cow<'_, [u8]> {
        match self.content() {
            Some(Content::Bytes(bytes)) => Cow::Borrowed(bytes),
            Some(Content::Text(text)) => Cow::Borrowed(text.as_bytes()),
            None => Cow::Borrowed(&[]),
        }
    }

    /// Replace the content with bytes.
    pub fn set_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        self.set_content(Some(Content::Bytes(bytes.into())));
    }

    /// Parsed document, parsing the current text if none is cached.
    pub fn document(&mut self) -> &Document {
        self.document_mut()
    }

    /// Mutable parsed document. Edits show up in the next text read.
    pub fn document_mut(&mut self) -> &mut Document {
        let document = match self.document.take() {
            Some(document) => document,
            None => {
                let parsed = string_to_document(&self.text());
                self.raw = None;
                parsed
            }
        };
        self.document.insert(document)
    }

    /// Replace the content with a document. Drops any cached raw content.
    pub fn set_document(&mut self, document: Document) {
        self.raw = None;
        self.document = Some(document);
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("url", &self.data.url)
            .field("source", &self.source_path())
            .field("is_copy", &self.is_copy)
            .field("raw", &self.raw.is_some())
            .field("document", &self.document.is_some())
            .finish_non_exhaustive()
    }
}
