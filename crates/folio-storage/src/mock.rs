//! Mock entry implementation for testing.
//!
//! Provides [`MockEntry`] for unit testing without filesystem access.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::entry::{ContentCache, Entry};
use crate::error::{StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory entry for testing.
///
/// Holds its bytes in memory, or fails every read with a configured
/// error kind. Reads are counted so tests can observe caching.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{BinaryLoader, Entry, MockEntry};
///
/// let entry = MockEntry::new("/css/site.css", "body {}");
/// let loaded = entry.get_content(&BinaryLoader).await?;
/// assert_eq!(entry.reads(), 1);
/// ```
#[derive(Debug)]
pub struct MockEntry {
    path: String,
    content: Vec<u8>,
    failure: Option<StorageErrorKind>,
    reads: AtomicUsize,
    cache: ContentCache,
}

impl MockEntry {
    /// Create an entry that reads back `content`.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            failure: None,
            reads: AtomicUsize::new(0),
            cache: ContentCache::new(),
        }
    }

    /// Create an entry whose reads always fail with `kind`.
    #[must_use]
    pub fn failing(path: impl Into<String>, kind: StorageErrorKind) -> Self {
        Self {
            failure: Some(kind),
            ..Self::new(path, Vec::new())
        }
    }

    /// Number of backend reads performed so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Entry for MockEntry {
    fn path(&self) -> &str {
        &self.path
    }

    async fn read(&self) -> Result<Vec<u8>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(kind) => Err(StorageError::new(kind)
                .with_path(&self.path)
                .with_backend(BACKEND)),
            None => Ok(self.content.clone()),
        }
    }

    fn cache(&self) -> &ContentCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use crate::loader::BinaryLoader;

    use super::*;

    #[tokio::test]
    async fn test_mock_entry_reads_content() {
        let entry = MockEntry::new("/a.txt", "hello");

        let loaded = entry.get_content(&BinaryLoader).await.unwrap();

        assert_eq!(loaded.content, b"hello");
        assert_eq!(entry.path(), "/a.txt");
        assert_eq!(entry.reads(), 1);
    }

    #[tokio::test]
    async fn test_mock_entry_failure() {
        let entry = MockEntry::failing("/gone.txt", StorageErrorKind::NotFound);

        let err = entry.get_content(&BinaryLoader).await.unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
        assert_eq!(err.to_string(), "[Mock] Not found (path: /gone.txt)");
    }
}
