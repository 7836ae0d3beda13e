//! Files that haven't been turned into pages yet.

use std::sync::Arc;

use folio_storage::{BinaryLoader, Entry};

use crate::content::Content;
use crate::data::RawData;
use crate::error::PageError;
use crate::page::Page;
use crate::src::Src;
use crate::url;

/// Origin of a static file. Unlike [`Src`], the entry is required.
#[derive(Debug, Clone)]
pub struct StaticSrc {
    pub path: String,
    pub ext: String,
    pub entry: Arc<dyn Entry>,
}

impl StaticSrc {
    /// Source for the file behind `entry`, split into path and extension.
    #[must_use]
    pub fn from_entry(entry: Arc<dyn Entry>) -> Self {
        let (path, ext) = url::split_ext(entry.path());
        Self {
            path: path.to_owned(),
            ext: ext.to_owned(),
            entry,
        }
    }
}

impl From<StaticSrc> for Src {
    fn from(src: StaticSrc) -> Self {
        Self {
            path: src.path,
            ext: src.ext,
            entry: Some(src.entry),
        }
    }
}

/// A file on disk, known by path and data, whose bytes haven't been read.
#[derive(Debug, Clone)]
pub struct StaticFile {
    pub src: StaticSrc,
    /// Data gathered before the file is read (front matter, config).
    pub data: RawData,
    /// Verbatim copy of the source file.
    pub is_copy: bool,
}

impl StaticFile {
    /// Create a file with empty data.
    #[must_use]
    pub fn new(src: StaticSrc) -> Self {
        Self {
            src,
            data: RawData::default(),
            is_copy: false,
        }
    }

    /// Create a file carrying `data`. The data isn't validated here.
    #[must_use]
    pub fn create(data: RawData, src: StaticSrc) -> Self {
        Self {
            data,
            ..Self::new(src)
        }
    }

    /// Create a file for `entry`, deriving path and extension from its path.
    #[must_use]
    pub fn from_entry(entry: Arc<dyn Entry>, data: RawData) -> Self {
        Self::create(data, StaticSrc::from_entry(entry))
    }

    /// Read the file and wrap it in a page.
    ///
    /// The bytes come from the entry through [`BinaryLoader`]; the page is
    /// built with [`Page::create`] from this file's data and source, then
    /// receives the bytes as content and this file's `is_copy` flag.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Storage`] with the entry's own error if the
    /// read fails, and [`PageError::Data`] if the data has no literal url.
    pub async fn to_page(&self) -> Result<Page, PageError> {
        let loaded = self.src.entry.get_content(&BinaryLoader).await?;

        let mut page = Page::create(self.data.clone(), Some(self.src.clone().into()))?;
        page.set_content(Some(Content::Bytes(loaded.content.clone())));
        page.is_copy = self.is_copy;

        Ok(page)
    }

    /// File path this file is written to, if its url is a literal string.
    #[must_use]
    pub fn output_path(&self) -> Option<String> {
        self.data.url_path().map(url::output_path)
    }

    /// `src.path + src.ext`, or `"(generated)"`.
    #[must_use]
    pub fn source_path(&self) -> String {
        url::source_path(&self.src.path, &self.src.ext)
    }
}
