//! The [`Entry`] trait and its per-loader content cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::loader::{Loaded, Loader};

/// Per-entry cache of loaded content, keyed by loader name.
#[derive(Debug, Default)]
pub struct ContentCache {
    loaded: Mutex<HashMap<&'static str, Arc<Loaded>>>,
}

impl ContentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `loader`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn get(&self, loader: &str) -> Option<Arc<Loaded>> {
        self.loaded.lock().unwrap().get(loader).cloned()
    }

    /// Store the result for `loader`, replacing any previous one.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, loader: &'static str, loaded: Arc<Loaded>) {
        self.loaded.lock().unwrap().insert(loader, loaded);
    }

    /// Drop every cached result.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.loaded.lock().unwrap().clear();
    }
}

/// A source file reachable by the build.
///
/// Paths are site-relative and start with `/` (e.g. `"/css/site.css"`).
/// Implementations only need to provide raw reads; loading and caching
/// are shared through [`Entry::get_content`].
#[async_trait]
pub trait Entry: Send + Sync + fmt::Debug {
    /// Site-relative path of the file.
    fn path(&self) -> &str;

    /// Read the raw bytes from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    async fn read(&self) -> Result<Vec<u8>, StorageError>;

    /// Cache backing [`Entry::get_content`].
    fn cache(&self) -> &ContentCache;

    /// Load the content with `loader`, reusing a previous load when cached.
    ///
    /// Failures are returned as-is and never cached.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] from the read or from the loader.
    async fn get_content(&self, loader: &dyn Loader) -> Result<Arc<Loaded>, StorageError> {
        if let Some(loaded) = self.cache().get(loader.name()) {
            return Ok(loaded);
        }

        let raw = self.read().await?;
        let loaded = Arc::new(loader.load(self.path(), raw)?);
        self.cache().insert(loader.name(), Arc::clone(&loaded));
        tracing::trace!(path = %self.path(), loader = loader.name(), "Loaded entry");

        Ok(loaded)
    }

    /// Forget every cached load, e.g. after the file changed on disk.
    fn flush(&self) {
        self.cache().clear();
    }
}
