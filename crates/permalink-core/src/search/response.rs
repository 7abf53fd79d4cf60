//! Decode the commit-search JSON body.

use serde::Deserialize;

use crate::error::PermalinkError;

/// The subset of the search response the resolver needs; other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<CommitItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitItem {
    pub sha: String,
}

pub fn parse_response(body: &[u8]) -> Result<SearchResponse, PermalinkError> {
    serde_json::from_slice(body).map_err(|e| PermalinkError::InvalidSearchResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_in_order_ignoring_extra_fields() {
        let body = br#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                { "sha": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "url": "https://x", "commit": {} },
                { "sha": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb" }
            ]
        }"#;
        let r = parse_response(body).unwrap();
        assert_eq!(r.total_count, Some(2));
        assert!(!r.incomplete_results);
        assert_eq!(r.items.len(), 2);
        assert_eq!(r.items[0].sha, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn minimal_body() {
        let r = parse_response(br#"{"items":[]}"#).unwrap();
        assert!(r.items.is_empty());
        assert!(r.total_count.is_none());
    }

    #[test]
    fn missing_items_is_invalid() {
        let err = parse_response(br#"{"message":"Validation Failed"}"#).unwrap_err();
        assert!(matches!(err, PermalinkError::InvalidSearchResponse(_)));
    }

    #[test]
    fn non_json_is_invalid() {
        assert!(matches!(
            parse_response(b"<html>oops</html>"),
            Err(PermalinkError::InvalidSearchResponse(_))
        ));
    }
}
