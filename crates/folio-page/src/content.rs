//! Raw page content: bytes or text.

use serde_json::Value;

/// Raw body of a page, either undecoded bytes or text.
///
/// Callers assign whichever form they have; conversions happen on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Undecoded bytes (e.g. an image or a file read as binary).
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Text(String),
}

impl Content {
    /// Coerce a loosely-typed data value (such as a `content` front matter key).
    ///
    /// - strings become [`Content::Text`]
    /// - arrays of integers in `0..=255` become [`Content::Bytes`]
    /// - `null` and `false` mean "no content"
    /// - anything else becomes its string form (`true`, `42`, JSON for objects)
    ///
    /// Only `null` and `false` clear the content: `0` becomes the text `"0"`
    /// and `""` stays an empty text.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
                    .collect::<Option<Vec<u8>>>()
                    .map_or_else(|| Self::Text(value.to_string()), Self::Bytes),
            ),
            other => Some(Self::Text(other.to_string())),
        }
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value_string() {
        assert_eq!(
            Content::from_value(&json!("<p>hi</p>")),
            Some(Content::Text("<p>hi</p>".to_owned()))
        );
        assert_eq!(
            Content::from_value(&json!("")),
            Some(Content::Text(String::new()))
        );
    }

    #[test]
    fn test_from_value_falsy_is_none() {
        assert_eq!(Content::from_value(&json!(null)), None);
        assert_eq!(Content::from_value(&json!(false)), None);
    }

    #[test]
    fn test_from_value_zero_and_empty_are_content() {
        assert_eq!(
            Content::from_value(&json!(0)),
            Some(Content::Text("0".to_owned()))
        );
        assert_eq!(
            Content::from_value(&json!("")),
            Some(Content::Text(String::new()))
        );
    }

    #[test]
    fn test_from_value_byte_array() {
        assert_eq!(
            Content::from_value(&json!([104, 105])),
            Some(Content::Bytes(b"hi".to_vec()))
        );
    }

    #[test]
    fn test_from_value_other_values_stringified() {
        assert_eq!(
            Content::from_value(&json!(42)),
            Some(Content::Text("42".to_owned()))
        );
        assert_eq!(
            Content::from_value(&json!(true)),
            Some(Content::Text("true".to_owned()))
        );
        assert_eq!(
            Content::from_value(&json!([1, 300])),
            Some(Content::Text("[1,300]".to_owned()))
        );
        assert_eq!(
            Content::from_value(&json!({"a": 1})),
            Some(Content::Text(r#"{"a":1}"#.to_owned()))
        );
    }
}
