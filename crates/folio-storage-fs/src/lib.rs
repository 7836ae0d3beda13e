//! Filesystem backend for Folio entries.
//!
//! [`FsSource`] walks a site source directory and yields one [`FsEntry`]
//! per file. Entries are lazy: nothing is read until a loader asks for
//! the content.
//!
//! ```ignore
//! use folio_storage_fs::FsSource;
//!
//! let entries = FsSource::new("site").with_ignore(["_*", "node_modules"]).scan()?;
//! for entry in &entries {
//!     println!("{}", entry.path());
//! }
//! ```

mod entry;
mod scanner;

pub use entry::FsEntry;
pub use scanner::FsSource;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";
