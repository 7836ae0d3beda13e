//! Site-level errors.

use folio_page::PageError;
use folio_storage::StorageError;

/// Failure while opening or promoting a site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Source directory scan failed.
    #[error("Failed to scan source directory: {0}")]
    Storage(#[from] StorageError),
    /// A static file could not become a page.
    #[error("Failed to promote static file: {0}")]
    Page(#[from] PageError),
}
