//! Validated batch of URLs to purge.

use serde::Serialize;

use crate::utils::url_validator::{ValidationError, validate_batch};

/// An ordered, validated list of absolute URLs submitted for purging.
///
/// A batch can only be obtained through [`PurgeBatch::parse`], so every
/// instance holds between one and `max_url_per_request` URLs, each with a
/// host component. Input order is preserved and duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PurgeBatch {
    urls: Vec<String>,
}

impl PurgeBatch {
    /// Parses raw newline-delimited text into a batch.
    ///
    /// # Errors
    ///
    /// See [`validate_batch`] for the rejection rules. The batch is
    /// all-or-nothing: a single bad line rejects the whole submission.
    pub fn parse(raw: &str, max_count: usize) -> Result<Self, ValidationError> {
        validate_batch(raw, max_count).map(|urls| Self { urls })
    }

    /// The URLs in submission order.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.urls.iter()
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

impl<'a> IntoIterator for &'a PurgeBatch {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let batch = PurgeBatch::parse(
            "https://b.example/\nhttps://a.example/\nhttps://b.example/",
            25,
        )
        .unwrap();

        assert_eq!(
            batch.urls(),
            &[
                "https://b.example/".to_string(),
                "https://a.example/".to_string(),
                "https://b.example/".to_string(),
            ]
        );
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_parse_rejects_oversized_batch() {
        let result = PurgeBatch::parse("http://a.example/\nhttp://b.example/", 1);
        assert!(matches!(
            result,
            Err(ValidationError::TooManyUrls { count: 2, max: 1 })
        ));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let batch = PurgeBatch::parse("http://a.example/", 25).unwrap();
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json, serde_json::json!(["http://a.example/"]));
    }
}
