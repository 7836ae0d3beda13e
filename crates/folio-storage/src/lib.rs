//! Entry and loader abstractions for Folio.
//!
//! A site build never reads files directly. Every source file is reached
//! through an [`Entry`], and every read goes through a [`Loader`] that turns
//! raw bytes into a [`Loaded`] value. Entries cache loads per loader, so
//! asking twice for the same representation touches the backend once.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Entry`] trait with `path()`, `read()` and the cached `get_content()`
//! - [`Loader`] trait and the fixed [`BinaryLoader`]
//! - [`StorageError`] with semantic kinds shared by every backend
//! - [`MockEntry`] for testing (behind `mock` feature flag)
//!
//! Filesystem entries live in `folio-storage-fs`.
//!
//! # Example
//!
//! ```ignore
//! use folio_storage::{BinaryLoader, Entry};
//!
//! let loaded = entry.get_content(&BinaryLoader).await?;
//! println!("{} bytes", loaded.content.len());
//! ```

mod entry;
mod error;
mod loader;
#[cfg(feature = "mock")]
mod mock;

pub use entry::{ContentCache, Entry};
pub use error::{StorageError, StorageErrorKind};
pub use loader::{BinaryLoader, Loaded, Loader};
#[cfg(feature = "mock")]
pub use mock::MockEntry;
