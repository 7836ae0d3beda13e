//! Pages and static files for Folio.
//!
//! A [`StaticFile`] is a source file known by path and data but not yet
//! read. A [`Page`] is one unit of output: a url, resolved [`Data`] and a
//! body that can be read or written as bytes, text or a parsed
//! [`Document`]. [`files_to_pages`] moves a filtered subset of static files
//! into the page list, reading each file's bytes through its storage
//! entry.
//!
//! # Data
//!
//! Authored data ([`RawData`]: front matter, shared config) is loosely
//! typed. It becomes strict [`Data`] through [`RawData::into_data`], which
//! requires a literal `url` and fills in `basename`, `date` and the owning
//! [`PageId`].
//!
//! # Example
//!
//! ```ignore
//! use folio_page::{by_extension, files_to_pages};
//!
//! files_to_pages(&mut files, &mut pages, by_extension(vec![".html".into()])).await?;
//! for page in &mut pages {
//!     println!("{} -> {}", page.source_path(), page.output_path());
//! }
//! ```

mod content;
mod data;
mod document;
mod error;
mod page;
mod promote;
mod src;
mod static_file;
pub mod url;

pub use content::Content;
pub use data::{Components, Data, MergeStrategy, PageId, RawData, RawDate, RawUrl, UrlFn};
pub use document::{Document, document_to_string, string_to_document};
pub use error::{DataError, PageError};
pub use page::Page;
pub use promote::{by_extension, files_to_pages};
pub use src::Src;
pub use static_file::{StaticFile, StaticSrc};
