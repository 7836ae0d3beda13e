//! Error types for page creation and promotion.

use folio_storage::StorageError;

/// Page data could not be finalized.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// No `url` key at all.
    #[error("Page data has no url")]
    MissingUrl,
    /// `url` is `false` or computed; it must be resolved to a string first.
    #[error("Page url must be resolved to a string before the page is created")]
    UrlNotString,
    /// Front matter could not be parsed.
    #[error("Front matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

/// Failure while turning a static file into a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The entry's content could not be fetched.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The file's data could not be finalized.
    #[error(transparent)]
    Data(#[from] DataError),
}
