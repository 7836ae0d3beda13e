//! Source directory discovery.
//!
//! The scanner only finds files. It never reads content; each discovered
//! file becomes a lazy [`FsEntry`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_storage::StorageError;
use glob::Pattern;

use crate::BACKEND;
use crate::entry::FsEntry;

/// A site source directory.
#[derive(Debug)]
pub struct FsSource {
    source_dir: PathBuf,
    ignore: Vec<Pattern>,
}

impl FsSource {
    /// Create a source rooted at `source_dir` with no ignore patterns.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ignore: Vec::new(),
        }
    }

    /// Add glob patterns for paths to skip.
    ///
    /// A pattern matches either the site-relative path without its leading
    /// slash (`"drafts/*.md"`) or a bare file/directory name (`"_*"`).
    /// Matching directories are skipped entirely. Invalid patterns are
    /// logged and ignored.
    #[must_use]
    pub fn with_ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match Pattern::new(pattern) {
                Ok(compiled) => self.ignore.push(compiled),
                Err(e) => {
                    tracing::warn!(
                        pattern = %pattern,
                        error = %e,
                        "Invalid ignore pattern, skipping"
                    );
                }
            }
        }
        self
    }

    /// Root directory of the source.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Walk the source directory and return one entry per file, sorted by path.
    ///
    /// Hidden files and directories (leading `.`) are skipped, as is anything
    /// matching an ignore pattern. Subdirectories that can't be read are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the source directory itself doesn't exist
    /// or can't be read.
    pub fn scan(&self) -> Result<Vec<Arc<FsEntry>>, StorageError> {
        let root = fs::read_dir(&self.source_dir).map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;

        let mut paths = Vec::new();
        self.collect(root, "", &mut paths);
        paths.sort();

        Ok(paths
            .iter()
            .map(|path| Arc::new(FsEntry::new(&self.source_dir, path)))
            .collect())
    }

    fn collect(&self, entries: fs::ReadDir, prefix: &str, paths: &mut Vec<String>) {
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let relative = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            if self.is_ignored(&name, &relative) {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                match fs::read_dir(entry.path()) {
                    Ok(children) => self.collect(children, &relative, paths),
                    Err(e) => {
                        tracing::warn!(
                            path = %relative,
                            error = %e,
                            "Failed to read directory, skipping"
                        );
                    }
                }
            } else {
                paths.push(relative);
            }
        }
    }

    fn is_ignored(&self, name: &str, relative: &str) -> bool {
        self.ignore
            .iter()
            .any(|p| p.matches(name) || p.matches(relative))
    }
}
