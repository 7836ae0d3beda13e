//! Site orchestration for Folio.
//!
//! Ties configuration, storage and pages together:
//! - [`Site::open`] scans the configured source directory into pending
//!   static files
//! - [`Site::promote`] turns files with a configured extension into pages
//!
//! # Quick Start
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_config::Config;
//! use folio_site::Site;
//!
//! let config = Config::load(None, None)?;
//! let mut site = Site::open(config)?;
//! site.promote().await?;
//!
//! for page in site.pages() {
//!     println!("{} -> {}", page.source_path(), site.output_file(page).display());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod site;

pub use error::SiteError;
pub use site::Site;
