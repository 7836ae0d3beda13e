//! Page data: as authored ([`RawData`]) and as resolved ([`Data`]).
//!
//! Front matter and config produce [`RawData`], a loose mapping with a few
//! well-known keys and an open `extra` map for everything else. Creating a
//! page finalizes it into [`Data`] with [`RawData::into_data`]. That step is
//! fallible only for `url`; every other field is carried as-is.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::DataError;
use crate::page::Page;
use crate::url::url_basename;

/// Render-time components available to a page.
pub type Components = Map<String, Value>;

/// Non-owning handle to a [`Page`].
///
/// Every page gets a process-unique id when constructed. `Data::page`
/// stores the id of the page owning that data, which stands in for a
/// back-reference without making the page own itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

impl PageId {
    /// Id carried by data that isn't attached to any page yet.
    pub const DETACHED: Self = Self(0);

    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a data key combines when layered data is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergeStrategy {
    /// Concatenate arrays, dropping repeated values.
    Array,
    /// Like [`MergeStrategy::Array`], with every element turned into a string.
    StringArray,
    /// Shallow-merge objects; the later layer wins per key.
    Object,
}

/// Function computing a page URL.
pub type UrlFn = Arc<dyn Fn(&Page) -> Option<String> + Send + Sync>;

/// Authored `url` value.
#[derive(Clone)]
pub enum RawUrl {
    /// Literal URL.
    Path(String),
    /// `url: false`: the page produces no output.
    Suppress,
    /// URL computed from the page.
    Computed(UrlFn),
}

impl RawUrl {
    /// Evaluate the URL for `page`. `None` means no output.
    #[must_use]
    pub fn resolve(&self, page: &Page) -> Option<String> {
        match self {
            Self::Path(url) => Some(url.clone()),
            Self::Suppress => None,
            Self::Computed(compute) => compute(page),
        }
    }
}

impl fmt::Debug for RawUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(url) => f.debug_tuple("Path").field(url).finish(),
            Self::Suppress => f.write_str("Suppress"),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for RawUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Path(String),
            Flag(bool),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Path(url) => Ok(Self::Path(url)),
            Repr::Flag(false) => Ok(Self::Suppress),
            Repr::Flag(true) => Err(D::Error::custom("url must be a string or false")),
        }
    }
}

/// Authored `date` value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// RFC 3339 timestamp or `YYYY-MM-DD` date.
    Text(String),
    /// Already-resolved instant.
    #[serde(skip_deserializing)]
    At(DateTime<Utc>),
}

impl RawDate {
    /// Parse into an instant; `None` if the value isn't a recognized date.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(date) => Some(*date),
            Self::Millis(millis) => DateTime::from_timestamp_millis(*millis),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|date| date.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(text, "%Y-%m-%d")
                        .ok()
                        .and_then(|day| day.and_hms_opt(0, 0, 0))
                        .map(|midnight| midnight.and_utc())
                }),
        }
    }
}

/// Page data as authored in front matter or config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawData {
    #[serde(default, deserialize_with = "string_or_seq")]
    pub tags: Option<Vec<String>>,
    pub url: Option<RawUrl>,
    pub basename: Option<String>,
    pub draft: Option<bool>,
    pub date: Option<RawDate>,
    pub render_order: Option<i32>,
    /// Inline body; coerced with [`Content::from_value`](crate::Content::from_value).
    pub content: Option<Value>,
    pub layout: Option<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub template_engine: Option<Vec<String>>,
    pub merged_keys: Option<BTreeMap<String, MergeStrategy>>,
    /// Every key not listed above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_seq<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
            Repr::One(one) => vec![one],
            Repr::Many(many) => many,
        }),
    )
}

impl RawData {
    /// Data holding only a literal `url`.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(RawUrl::Path(url.into())),
            ..Self::default()
        }
    }

    /// Parse YAML front matter. Blank input gives empty data.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::FrontMatter`] if the YAML is malformed or a
    /// well-known key has the wrong shape.
    pub fn from_yaml(yaml: &str) -> Result<Self, DataError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Literal URL, if `url` is a plain string.
    #[must_use]
    pub fn url_path(&self) -> Option<&str> {
        match &self.url {
            Some(RawUrl::Path(url)) => Some(url),
            _ => None,
        }
    }

    /// Layer `child` over `self`.
    ///
    /// Child values replace parent values key by key. `tags` always merge
    /// as a string array. `merged_keys` of both layers are combined, and
    /// each listed `extra` key present in both layers is merged with its
    /// strategy; values of the wrong shape fall back to replacement.
    #[must_use]
    pub fn merge(&self, child: &Self) -> Self {
        let mut merged_keys = self.merged_keys.clone().unwrap_or_default();
        if let Some(keys) = &child.merged_keys {
            merged_keys.extend(keys.iter().map(|(k, v)| (k.clone(), *v)));
        }

        let mut extra = self.extra.clone();
        for (key, value) in &child.extra {
            let merged = match (merged_keys.get(key), self.extra.get(key)) {
                (Some(strategy), Some(previous)) => merge_values(*strategy, previous, value),
                _ => value.clone(),
            };
            extra.insert(key.clone(), merged);
        }

        let tags = match (&self.tags, &child.tags) {
            (None, None) => None,
            (inherited, own) => Some(unique(
                inherited
                    .iter()
                    .flatten()
                    .chain(own.iter().flatten())
                    .cloned(),
            )),
        };

        Self {
            tags,
            url: child.url.clone().or_else(|| self.url.clone()),
            basename: child.basename.clone().or_else(|| self.basename.clone()),
            draft: child.draft.or(self.draft),
            date: child.date.clone().or_else(|| self.date.clone()),
            render_order: child.render_order.or(self.render_order),
            content: child.content.clone().or_else(|| self.content.clone()),
            layout: child.layout.clone().or_else(|| self.layout.clone()),
            template_engine: child
                .template_engine
                .clone()
                .or_else(|| self.template_engine.clone()),
            merged_keys: (!merged_keys.is_empty()).then_some(merged_keys),
            extra,
        }
    }

    /// Finalize into strict [`Data`] owned by `page`.
    ///
    /// `url` must be a literal string; a trailing `index.html` is dropped so
    /// the canonical URL is the directory form. `basename` is always derived
    /// from the URL as given. `title`, `type`, `id`, `lang` and
    /// `unmatchedLangUrl` are lifted out of `extra` when they are strings
    /// (or numbers). Nothing else is validated.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingUrl`] without a `url`, and
    /// [`DataError::UrlNotString`] for `url: false` or a computed url.
    pub fn into_data(self, page: PageId) -> Result<Data, DataError> {
        let url = match self.url {
            Some(RawUrl::Path(url)) => url,
            Some(_) => return Err(DataError::UrlNotString),
            None => return Err(DataError::MissingUrl),
        };

        let basename = url_basename(&url);
        let url = match url.strip_suffix("index.html") {
            Some(dir) if dir.ends_with('/') => dir.to_owned(),
            _ => url,
        };

        let date = match &self.date {
            Some(raw) => raw.to_datetime().unwrap_or_else(|| {
                tracing::debug!(url = %url, date = ?raw, "Unrecognized date, using Unix epoch");
                DateTime::UNIX_EPOCH
            }),
            None => DateTime::UNIX_EPOCH,
        };

        let mut extra = self.extra;
        let title = take_string(&mut extra, "title");
        let page_type = take_string(&mut extra, "type");
        let id = take_string(&mut extra, "id");
        let lang = take_string(&mut extra, "lang");
        let unmatched_lang_url = take_string(&mut extra, "unmatchedLangUrl");

        Ok(Data {
            tags: self.tags.unwrap_or_default(),
            url,
            basename,
            date,
            comp: Components::new(),
            page,
            title,
            page_type,
            id,
            lang,
            unmatched_lang_url,
            alternates: Vec::new(),
            draft: self.draft.unwrap_or(false),
            render_order: self.render_order,
            content: self.content,
            layout: self.layout,
            template_engine: self.template_engine.unwrap_or_default(),
            merged_keys: self.merged_keys.unwrap_or_default(),
            extra,
        })
    }
}

fn take_string(extra: &mut Map<String, Value>, key: &str) -> Option<String> {
    let text = match extra.get(key)? {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    extra.remove(key);
    Some(text)
}

fn unique<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn merge_values(strategy: MergeStrategy, previous: &Value, current: &Value) -> Value {
    match (strategy, previous, current) {
        (MergeStrategy::Array, Value::Array(prev), Value::Array(curr)) => {
            Value::Array(unique(prev.iter().chain(curr).cloned()))
        }
        (MergeStrategy::StringArray, Value::Array(prev), Value::Array(curr)) => Value::Array(
            unique(prev.iter().chain(curr).map(stringify))
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
        (MergeStrategy::StringArray, Value::Array(prev), scalar) => Value::Array(
            unique(prev.iter().chain(std::iter::once(scalar)).map(stringify))
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
        (MergeStrategy::Object, Value::Object(prev), Value::Object(curr)) => {
            let mut merged = prev.clone();
            merged.extend(curr.iter().map(|(k, v)| (k.clone(), v.clone())));
            Value::Object(merged)
        }
        _ => current.clone(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Fully resolved page data.
#[derive(Debug, Clone)]
pub struct Data {
    pub tags: Vec<String>,
    /// Canonical URL (directory form for index pages).
    pub url: String,
    pub basename: String,
    pub date: DateTime<Utc>,
    pub comp: Components,
    /// The page owning this data.
    pub page: PageId,
    pub title: Option<String>,
    pub page_type: Option<String>,
    pub id: Option<String>,
    pub lang: Option<String>,
    pub unmatched_lang_url: Option<String>,
    /// Same content in other languages.
    pub alternates: Vec<PageId>,
    pub draft: bool,
    pub render_order: Option<i32>,
    pub content: Option<Value>,
    pub layout: Option<String>,
    pub template_engine: Vec<String>,
    pub merged_keys: BTreeMap<String, MergeStrategy>,
    pub extra: Map<String, Value>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            url: String::new(),
            basename: String::new(),
            date: DateTime::UNIX_EPOCH,
            comp: Components::new(),
            page: PageId::DETACHED,
            title: None,
            page_type: None,
            id: None,
            lang: None,
            unmatched_lang_url: None,
            alternates: Vec::new(),
            draft: false,
            render_order: None,
            content: None,
            layout: None,
            template_engine: Vec::new(),
            merged_keys: BTreeMap::new(),
            extra: Map::new(),
        }
    }
}

impl Data {
    /// Value of an extra (non well-known) key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_yaml_known_and_extra_keys() {
        let raw = RawData::from_yaml(
            r"
title: Hello
url: /hello/
tags: news
draft: true
renderOrder: 2
templateEngine: [md, njk]
mergedKeys:
  authors: stringArray
authors: [ana]
",
        )
        .unwrap();

        assert_eq!(raw.url_path(), Some("/hello/"));
        assert_eq!(raw.tags, Some(vec!["news".to_owned()]));
        assert_eq!(raw.draft, Some(true));
        assert_eq!(raw.render_order, Some(2));
        assert_eq!(
            raw.template_engine,
            Some(vec!["md".to_owned(), "njk".to_owned()])
        );
        assert_eq!(
            raw.merged_keys.as_ref().unwrap().get("authors"),
            Some(&MergeStrategy::StringArray)
        );
        assert_eq!(raw.extra.get("title"), Some(&json!("Hello")));
        assert_eq!(raw.extra.get("authors"), Some(&json!(["ana"])));
    }

    #[test]
    fn test_from_yaml_url_false_and_blank() {
        let raw = RawData::from_yaml("url: false").unwrap();
        assert!(matches!(raw.url, Some(RawUrl::Suppress)));

        assert!(RawData::from_yaml("url: true").is_err());
        assert!(RawData::from_yaml("  \n").unwrap().url.is_none());
    }

    #[test]
    fn test_into_data_requires_literal_url() {
        assert!(matches!(
            RawData::default().into_data(PageId::DETACHED),
            Err(DataError::MissingUrl)
        ));

        let suppressed = RawData {
            url: Some(RawUrl::Suppress),
            ..RawData::default()
        };
        assert!(matches!(
            suppressed.into_data(PageId::DETACHED),
            Err(DataError::UrlNotString)
        ));
    }

    #[test]
    fn test_into_data_rejects_computed_url() {
        let computed = RawData {
            url: Some(RawUrl::Computed(Arc::new(|_: &Page| Some("/x/".to_owned())))),
            ..RawData::default()
        };

        assert!(matches!(
            computed.into_data(PageId::DETACHED),
            Err(DataError::UrlNotString)
        ));
    }

    #[test]
    fn test_raw_url_resolve() {
        let page = Page::create(RawData::with_url("/posts/hello.html"), None).unwrap();

        let computed = RawUrl::Computed(Arc::new(|page: &Page| {
            Some(format!("/archive/{}/", page.data.basename))
        }));
        assert_eq!(computed.resolve(&page).as_deref(), Some("/archive/hello/"));
        assert_eq!(format!("{computed:?}"), "Computed(..)");

        let literal = RawUrl::Path("/a/".to_owned());
        assert_eq!(literal.resolve(&page).as_deref(), Some("/a/"));
        assert_eq!(RawUrl::Suppress.resolve(&page), None);
    }

    #[test]
    fn test_into_data_normalizes_url_and_lifts_fields() {
        let mut raw = RawData::with_url("/docs/index.html");
        raw.basename = Some("ignored".to_owned());
        raw.extra.insert("title".to_owned(), json!("Docs"));
        raw.extra.insert("id".to_owned(), json!(7));
        raw.extra.insert("lang".to_owned(), json!(["en"]));

        let data = raw.into_data(PageId::DETACHED).unwrap();

        assert_eq!(data.url, "/docs/");
        assert_eq!(data.basename, "index");
        assert_eq!(data.title.as_deref(), Some("Docs"));
        assert_eq!(data.id.as_deref(), Some("7"));
        // Not a string: stays in extra
        assert_eq!(data.lang, None);
        assert_eq!(data.get("lang"), Some(&json!(["en"])));
        assert_eq!(data.get("title"), None);
    }

    #[test]
    fn test_into_data_keeps_index_html_without_directory() {
        let data = RawData::with_url("index.html")
            .into_data(PageId::DETACHED)
            .unwrap();

        assert_eq!(data.url, "index.html");
    }

    #[test]
    fn test_raw_date_parsing() {
        let expected = DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            RawDate::Text("2024-03-01".to_owned()).to_datetime(),
            Some(expected)
        );
        assert_eq!(
            RawDate::Text("2024-03-01T00:00:00+00:00".to_owned()).to_datetime(),
            Some(expected)
        );
        assert_eq!(
            RawDate::Millis(expected.timestamp_millis()).to_datetime(),
            Some(expected)
        );
        assert_eq!(RawDate::Text("yesterday".to_owned()).to_datetime(), None);
    }

    #[test]
    fn test_into_data_date_fallback() {
        let mut raw = RawData::with_url("/a/");
        raw.date = Some(RawDate::Text("not a date".to_owned()));

        let data = raw.into_data(PageId::DETACHED).unwrap();

        assert_eq!(data.date, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_merge_overrides_and_tags() {
        let parent = RawData {
            tags: Some(vec!["a".to_owned(), "b".to_owned()]),
            layout: Some("base.html".to_owned()),
            draft: Some(true),
            ..RawData::with_url("/parent/")
        };
        let child = RawData {
            tags: Some(vec!["b".to_owned(), "c".to_owned()]),
            draft: Some(false),
            ..RawData::with_url("/child/")
        };

        let merged = parent.merge(&child);

        assert_eq!(
            merged.tags,
            Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
        assert_eq!(merged.url_path(), Some("/child/"));
        assert_eq!(merged.layout.as_deref(), Some("base.html"));
        assert_eq!(merged.draft, Some(false));
        assert!(merged.merged_keys.is_none());
    }

    #[test]
    fn test_merge_strategies() {
        let mut parent = RawData::default();
        parent.merged_keys = Some(BTreeMap::from([
            ("links".to_owned(), MergeStrategy::Array),
            ("meta".to_owned(), MergeStrategy::Object),
        ]));
        parent.extra.insert("links".to_owned(), json!([1, 2]));
        parent.extra.insert("meta".to_owned(), json!({"a": 1, "b": 1}));
        parent.extra.insert("authors".to_owned(), json!(["ana"]));
        parent.extra.insert("plain".to_owned(), json!([1]));

        let mut child = RawData::default();
        child.merged_keys = Some(BTreeMap::from([(
            "authors".to_owned(),
            MergeStrategy::StringArray,
        )]));
        child.extra.insert("links".to_owned(), json!([2, 3]));
        child.extra.insert("meta".to_owned(), json!({"b": 2}));
        child.extra.insert("authors".to_owned(), json!([1, "ana"]));
        child.extra.insert("plain".to_owned(), json!([2]));

        let merged = parent.merge(&child);

        assert_eq!(merged.extra.get("links"), Some(&json!([1, 2, 3])));
        assert_eq!(merged.extra.get("meta"), Some(&json!({"a": 1, "b": 2})));
        assert_eq!(merged.extra.get("authors"), Some(&json!(["ana", "1"])));
        assert_eq!(merged.extra.get("plain"), Some(&json!([2])));
        assert_eq!(merged.merged_keys.map(|keys| keys.len()), Some(3));
    }

    #[test]
    fn test_merge_wrong_shape_replaces() {
        let mut parent = RawData::default();
        parent.merged_keys = Some(BTreeMap::from([(
            "meta".to_owned(),
            MergeStrategy::Object,
        )]));
        parent.extra.insert("meta".to_owned(), json!({"a": 1}));

        let mut child = RawData::default();
        child.extra.insert("meta".to_owned(), json!("none"));

        assert_eq!(parent.merge(&child).extra.get("meta"), Some(&json!("none")));
    }
}
