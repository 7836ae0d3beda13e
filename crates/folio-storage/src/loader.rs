//! Loaders decode the raw bytes of an entry.

use crate::error::StorageError;

/// Result of loading an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// Decoded body.
    pub content: Vec<u8>,
}

/// Decoding strategy applied to the raw bytes of an entry.
///
/// Entries cache one [`Loaded`] value per loader, keyed by [`Loader::name`],
/// so two loaders must never share a name.
pub trait Loader: Send + Sync {
    /// Stable identifier used as the cache key.
    fn name(&self) -> &'static str;

    /// Turn raw bytes read from `path` into a [`Loaded`] value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the bytes cannot be interpreted.
    fn load(&self, path: &str, raw: Vec<u8>) -> Result<Loaded, StorageError>;
}

/// Loader that keeps the bytes untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryLoader;

impl Loader for BinaryLoader {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn load(&self, _path: &str, raw: Vec<u8>) -> Result<Loaded, StorageError> {
        Ok(Loaded { content: raw })
    }
}
