//! Path and URL helpers shared by pages and static files.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

/// Source path reported for pages without a physical file.
pub const GENERATED: &str = "(generated)";

/// Trailing file extension: a dot followed by ASCII word characters.
static TRAILING_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[A-Za-z0-9_]+$").unwrap());

/// Last segment of a `/`-separated path, ignoring trailing slashes.
///
/// `"/a/b.html"` gives `"b.html"`, `"/a/"` gives `"a"`, `"/"` gives `""`.
#[must_use]
pub fn posix_basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Basename of a page URL without its extension.
///
/// `"/a/b.html"` gives `"b"`, `"/blog/"` gives `"blog"`.
#[must_use]
pub fn url_basename(url: &str) -> String {
    TRAILING_EXT_RE
        .replace(posix_basename(url), "")
        .into_owned()
}

/// Percent-decode `path`, returning it unchanged if it has a malformed
/// escape or the result isn't UTF-8.
#[must_use]
pub fn decode_uri_component_safe(path: &str) -> String {
    if has_malformed_escape(path) {
        tracing::debug!(path = %path, "Malformed percent escape, keeping raw path");
        return path.to_owned();
    }
    match percent_decode_str(path).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "URL decoding failed, keeping raw path");
            path.to_owned()
        }
    }
}

/// True if some `%` isn't followed by two hex digits.
fn has_malformed_escape(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.iter().enumerate().any(|(idx, &byte)| {
        byte == b'%'
            && !matches!(
                bytes.get(idx + 1..idx + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

/// File path a URL is written to.
///
/// Directory URLs (trailing `/`) get `index.html` appended, then the
/// result is percent-decoded.
#[must_use]
pub fn output_path(url: &str) -> String {
    if url.ends_with('/') {
        decode_uri_component_safe(&format!("{url}index.html"))
    } else {
        decode_uri_component_safe(url)
    }
}

/// Human-readable source location: `path + ext`, or [`GENERATED`].
#[must_use]
pub fn source_path(path: &str, ext: &str) -> String {
    if path.is_empty() {
        GENERATED.to_owned()
    } else {
        format!("{path}{ext}")
    }
}

/// Split a site-relative file path into path-without-extension and extension.
///
/// The extension keeps its leading dot. Dot-files have no extension.
///
/// ```
/// use folio_page::url::split_ext;
///
/// assert_eq!(split_ext("/css/site.css"), ("/css/site", ".css"));
/// assert_eq!(split_ext("/a.tar.gz"), ("/a.tar", ".gz"));
/// assert_eq!(split_ext("/.htaccess"), ("/.htaccess", ""));
/// ```
#[must_use]
pub fn split_ext(path: &str) -> (&str, &str) {
    let name_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => path.split_at(name_start + dot),
        _ => (path, ""),
    }
}
