//! A source directory opened as pending static files and realized pages.

use std::path::PathBuf;
use std::sync::Arc;

use folio_config::Config;
use folio_page::{Page, RawData, StaticFile, by_extension, files_to_pages};
use folio_storage::Entry;
use folio_storage_fs::FsSource;

use crate::error::SiteError;

/// Files and pages of one site build.
///
/// Every file found in the source directory starts out as a [`StaticFile`]
/// whose url is its site-relative path. [`Site::promote`] moves the files
/// with a configured extension into the page list.
#[derive(Debug)]
pub struct Site {
    config: Config,
    files: Vec<StaticFile>,
    pages: Vec<Page>,
}

impl Site {
    /// Scan the configured source directory.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if the source directory can't be read.
    pub fn open(config: Config) -> Result<Self, SiteError> {
        Self::open_with(config, &RawData::default())
    }

    /// Scan the configured source directory, merging `shared` data under
    /// each file's own data.
    ///
    /// The config file itself is skipped when it lives inside the source
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if the source directory can't be read.
    pub fn open_with(config: Config, shared: &RawData) -> Result<Self, SiteError> {
        let source = FsSource::new(&config.source_resolved.dir)
            .with_ignore(&config.source_resolved.ignore);

        let files: Vec<StaticFile> = source
            .scan()?
            .into_iter()
            .filter(|entry| config.config_path.as_deref() != Some(entry.full_path()))
            .map(|entry| {
                let data = shared.merge(&RawData::with_url(entry.path()));
                let entry: Arc<dyn Entry> = entry;
                StaticFile {
                    is_copy: true,
                    ..StaticFile::from_entry(entry, data)
                }
            })
            .collect();

        tracing::info!(
            source_dir = %config.source_resolved.dir.display(),
            files = files.len(),
            "Opened site"
        );

        Ok(Self {
            config,
            files,
            pages: Vec::new(),
        })
    }

    /// Promote every pending file whose extension is listed in
    /// `promote.extensions` and return how many were promoted.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Page`] for the first file that can't be read or
    /// finalized. Files promoted before it stay promoted.
    pub async fn promote(&mut self) -> Result<usize, SiteError> {
        let filter = by_extension(self.config.promote.extensions.clone());
        let before = self.pages.len();

        files_to_pages(&mut self.files, &mut self.pages, filter).await?;

        let promoted = self.pages.len() - before;
        tracing::info!(promoted, pending = self.files.len(), "Promoted static files");
        Ok(promoted)
    }

    /// Resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Files not yet promoted.
    #[must_use]
    pub fn files(&self) -> &[StaticFile] {
        &self.files
    }

    /// Realized pages, in promotion order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Mutable access to the pages, for reading or rewriting content.
    pub fn pages_mut(&mut self) -> &mut Vec<Page> {
        &mut self.pages
    }

    /// Destination file of `page` below `build.dest`.
    #[must_use]
    pub fn output_file(&self, page: &Page) -> PathBuf {
        self.config.build_resolved.output_file(&page.output_path())
    }
}
