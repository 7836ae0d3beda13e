//! Promotion of pending static files into pages.

use crate::error::PageError;
use crate::page::Page;
use crate::static_file::StaticFile;

/// Move every file matching `filter` from `files` into `pages`.
///
/// Matches are decided up front, before either collection changes. Each
/// selected file is read with [`StaticFile::to_page`], one at a time in
/// their original order; the page is appended to `pages` and the file is
/// removed from `files`. Unselected files keep their relative order.
///
/// # Errors
///
/// Stops at the first file that fails to convert and returns its error.
/// Files before it have already been promoted and removed; the failing
/// file and everything after it are left in `files` untouched.
pub async fn files_to_pages<F>(
    files: &mut Vec<StaticFile>,
    pages: &mut Vec<Page>,
    filter: F,
) -> Result<(), PageError>
where
    F: Fn(&StaticFile) -> bool,
{
    let selected: Vec<bool> = files.iter().map(&filter).collect();

    let mut cursor = 0;
    for promote in selected {
        if !promote {
            cursor += 1;
            continue;
        }

        let page = files[cursor].to_page().await?;
        let file = files.remove(cursor);
        tracing::debug!(
            source = %file.source_path(),
            url = %page.data.url,
            "Promoted static file to page"
        );
        pages.push(page);
    }

    Ok(())
}

/// Predicate selecting files whose source extension is one of `exts`.
///
/// Extensions include the leading dot and compare exactly.
pub fn by_extension(exts: Vec<String>) -> impl Fn(&StaticFile) -> bool {
    move |file| exts.iter().any(|ext| *ext == file.src.ext)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_storage::{Entry, MockEntry, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::RawData;

    fn file(path: &str) -> StaticFile {
        let entry: Arc<dyn Entry> = Arc::new(MockEntry::new(path, format!("content of {path}")));
        StaticFile::from_entry(entry, RawData::with_url(path))
    }

    fn failing(path: &str) -> StaticFile {
        let entry: Arc<dyn Entry> = Arc::new(MockEntry::failing(path, StorageErrorKind::NotFound));
        StaticFile::from_entry(entry, RawData::with_url(path))
    }

    fn paths(files: &[StaticFile]) -> Vec<String> {
        files.iter().map(StaticFile::source_path).collect()
    }

    #[tokio::test]
    async fn test_promotes_matching_files() {
        let mut files = vec![file("/index.html"), file("/style.css")];
        let mut pages = Vec::new();

        files_to_pages(&mut files, &mut pages, |f| f.src.ext == ".html")
            .await
            .unwrap();

        assert_eq!(paths(&files), vec!["/style.css"]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].source_path(), "/index.html");
        assert_eq!(pages[0].data.url, "/");
        assert_eq!(pages[0].text(), "content of /index.html");
    }

    #[tokio::test]
    async fn test_preserves_order() {
        let mut files = vec![
            file("/a.html"),
            file("/b.css"),
            file("/c.html"),
            file("/d.css"),
            file("/e.html"),
        ];
        let mut pages = vec![Page::new(None)];

        files_to_pages(&mut files, &mut pages, by_extension(vec![".html".to_owned()]))
            .await
            .unwrap();

        assert_eq!(paths(&files), vec!["/b.css", "/d.css"]);
        let promoted: Vec<_> = pages.iter().map(Page::source_path).collect();
        assert_eq!(
            promoted,
            vec!["(generated)", "/a.html", "/c.html", "/e.html"]
        );
    }

    #[tokio::test]
    async fn test_no_matches() {
        let mut files = vec![file("/a.css")];
        let mut pages = Vec::new();

        files_to_pages(&mut files, &mut pages, |_| false).await.unwrap();

        assert_eq!(paths(&files), vec!["/a.css"]);
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_consumed_prefix() {
        let mut files = vec![
            file("/a.html"),
            file("/b.css"),
            failing("/c.html"),
            file("/d.html"),
        ];
        let mut pages = Vec::new();

        let err = files_to_pages(&mut files, &mut pages, |f| f.src.ext == ".html")
            .await
            .unwrap_err();

        assert!(matches!(err, PageError::Storage(_)));
        assert_eq!(paths(&files), vec!["/b.css", "/c.html", "/d.html"]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].source_path(), "/a.html");
    }

    #[test]
    fn test_by_extension() {
        let matches = by_extension(vec![".html".to_owned(), ".svg".to_owned()]);

        assert!(matches(&file("/a.html")));
        assert!(matches(&file("/img/b.svg")));
        assert!(!matches(&file("/c.css")));
        assert!(!matches(&file("/d.htm")));
    }
}
