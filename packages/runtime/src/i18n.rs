use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// A label that is either plain text or a map of language code to text,
/// such as a section's `label` property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Translatable {
    Text(String),
    Translations(Map<String, Json>),
}

impl From<&str> for Translatable {
    fn from(text: &str) -> Self {
        Translatable::Text(text.to_string())
    }
}

/// Pick the text for `code`. Maps without that language, or with a `null`
/// entry for it, fall back to their first entry.
pub fn translate<'a>(value: &'a Translatable, code: &str) -> Option<&'a str> {
    match value {
        Translatable::Text(text) => Some(text.as_str()),
        Translatable::Translations(map) => map
            .get(code)
            .filter(|entry| !entry.is_null())
            .or_else(|| map.values().next())
            .and_then(Json::as_str),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_returned_unchanged() {
        assert_eq!(translate(&"Hello".into(), "de"), Some("Hello"));
        assert_eq!(translate(&"".into(), "de"), Some(""));
    }

    #[test]
    fn test_translation_map() {
        let label: Translatable = serde_json::from_str(r#"{ "en": "Hello", "de": "Hallo" }"#).unwrap();

        assert_eq!(translate(&label, "de"), Some("Hallo"));
        assert_eq!(translate(&label, "en"), Some("Hello"));
        // First entry in document order
        assert_eq!(translate(&label, "fr"), Some("Hello"));
    }

    #[test]
    fn test_null_entry_falls_back() {
        let label: Translatable =
            serde_json::from_str(r#"{ "en": "Hello", "de": null }"#).unwrap();
        assert_eq!(translate(&label, "de"), Some("Hello"));
    }

    #[test]
    fn test_empty_map() {
        let label: Translatable = serde_json::from_str("{}").unwrap();
        assert_eq!(translate(&label, "en"), None);
    }
}
