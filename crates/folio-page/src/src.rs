//! Where a page's content comes from.

use std::sync::Arc;

use folio_storage::Entry;

use crate::url;

/// Origin of a page.
///
/// `path` is the site-relative file path without extension and `ext` the
/// extension with its leading dot. Both empty means the page is generated
/// and has no file behind it.
#[derive(Debug, Clone, Default)]
pub struct Src {
    pub path: String,
    pub ext: String,
    /// Handle used to fetch the raw bytes; absent for synthetic pages.
    pub entry: Option<Arc<dyn Entry>>,
}

impl Src {
    /// Source for the file behind `entry`, split into path and extension.
    #[must_use]
    pub fn from_entry(entry: Arc<dyn Entry>) -> Self {
        let (path, ext) = url::split_ext(entry.path());
        Self {
            path: path.to_owned(),
            ext: ext.to_owned(),
            entry: Some(entry),
        }
    }

    /// True for pages with no file behind them.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.path.is_empty()
    }

    /// `path + ext`, or `"(generated)"`.
    #[must_use]
    pub fn source_path(&self) -> String {
        url::source_path(&self.path, &self.ext)
    }
}
