//! Filesystem-backed [`Entry`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_storage::{ContentCache, Entry, StorageError};

use crate::BACKEND;

/// A file below a source directory.
#[derive(Debug)]
pub struct FsEntry {
    /// Site-relative path, always starting with `/`.
    path: String,
    full_path: PathBuf,
    cache: ContentCache,
}

impl FsEntry {
    /// Create an entry for `path` (site-relative) below `source_dir`.
    ///
    /// A missing leading slash is added, so `"css/a.css"` and `"/css/a.css"`
    /// name the same entry.
    #[must_use]
    pub fn new(source_dir: &Path, path: &str) -> Self {
        let relative = path.trim_start_matches('/');
        Self {
            path: format!("/{relative}"),
            full_path: source_dir.join(relative),
            cache: ContentCache::new(),
        }
    }

    /// Absolute location on disk.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }
}

#[async_trait]
impl Entry for FsEntry {
    fn path(&self) -> &str {
        &self.path
    }

    async fn read(&self) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(&self.full_path)
            .await
            .map_err(|e| StorageError::io(e, Some(self.full_path.clone())).with_backend(BACKEND))
    }

    fn cache(&self) -> &ContentCache {
        &self.cache
    }
}
