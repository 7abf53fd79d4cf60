//! Commit resolution: newest commit in a repository before a date.

use crate::error::PermalinkError;
use crate::search::{parse_response, SearchQuery};
use crate::transport::CommitSearch;

/// Length of a full hex commit SHA-1.
pub const FULL_SHA_LEN: usize = 40;

pub fn is_full_sha(s: &str) -> bool {
    s.len() == FULL_SHA_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Return the SHA of the most recent commit in `repo` committed before `date`.
///
/// Issues exactly one search through `transport`. Only the first result is
/// used; result pages are never followed.
pub fn resolve(
    transport: &dyn CommitSearch,
    repo: &str,
    date: &str,
) -> Result<String, PermalinkError> {
    let query = SearchQuery::new(repo, date);
    tracing::info!("searching {} for commits before {} via {}", repo, date, transport.name());

    let body = transport.search(&query)?;
    let response = parse_response(&body)?;
    tracing::debug!(
        "search matched {} commit(s), {} on first page",
        response
            .total_count
            .map_or_else(|| "?".to_string(), |n| n.to_string()),
        response.items.len()
    );
    if response.incomplete_results {
        tracing::warn!("GitHub reported incomplete search results for {}", repo);
    }

    let first = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| PermalinkError::NoMatchingCommit {
            repo: repo.to_string(),
            date: date.to_string(),
        })?;
    if !is_full_sha(&first.sha) {
        return Err(PermalinkError::InvalidSearchResponse(format!(
            "first item sha {:?} is not a full commit hash",
            first.sha
        )));
    }
    tracing::info!("resolved {} before {} to {}", repo, date, first.sha);
    Ok(first.sha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const SHA_A: &str = "abc1230000000000000000000000000000beef01";
    const SHA_B: &str = "fedcba9876543210fedcba9876543210fedcba98";

    /// Canned transport that records the queries it receives.
    struct CannedSearch {
        reply: Result<String, (Option<u32>, String)>,
        seen: RefCell<Vec<SearchQuery>>,
    }

    impl CannedSearch {
        fn ok(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn status(code: u32, body: &str) -> Self {
            Self {
                reply: Err((Some(code), body.to_string())),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommitSearch for CannedSearch {
        fn name(&self) -> &str {
            "canned"
        }

        fn search(&self, query: &SearchQuery) -> Result<Vec<u8>, PermalinkError> {
            self.seen.borrow_mut().push(query.clone());
            match &self.reply {
                Ok(body) => Ok(body.clone().into_bytes()),
                Err((status, body)) => Err(PermalinkError::Api {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }
    }

    #[test]
    fn takes_first_item() {
        let t = CannedSearch::ok(&format!(
            r#"{{"total_count":2,"items":[{{"sha":"{}"}},{{"sha":"{}"}}]}}"#,
            SHA_A, SHA_B
        ));
        assert_eq!(resolve(&t, "acme/widget", "2021-03-01").unwrap(), SHA_A);
        let seen = t.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], SearchQuery::new("acme/widget", "2021-03-01"));
    }

    #[test]
    fn empty_items_is_no_matching_commit() {
        let t = CannedSearch::ok(r#"{"total_count":0,"incomplete_results":false,"items":[]}"#);
        match resolve(&t, "acme/widget", "2001-01-01") {
            Err(PermalinkError::NoMatchingCommit { repo, date }) => {
                assert_eq!(repo, "acme/widget");
                assert_eq!(date, "2001-01-01");
            }
            other => panic!("expected NoMatchingCommit, got {:?}", other),
        }
    }

    #[test]
    fn api_error_passes_through_untouched() {
        let body = r#"{"message":"API rate limit exceeded"}"#;
        let t = CannedSearch::status(403, body);
        match resolve(&t, "acme/widget", "2021-03-01") {
            Err(PermalinkError::Api { status, body: got }) => {
                assert_eq!(status, Some(403));
                assert_eq!(got, body);
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[test]
    fn short_sha_is_rejected() {
        let t = CannedSearch::ok(r#"{"items":[{"sha":"abc123"}]}"#);
        assert!(matches!(
            resolve(&t, "acme/widget", "2021-03-01"),
            Err(PermalinkError::InvalidSearchResponse(_))
        ));
    }

    #[test]
    fn full_sha_check() {
        assert!(is_full_sha(SHA_A));
        assert!(is_full_sha(&SHA_B.to_uppercase()));
        assert!(!is_full_sha("main"));
        assert!(!is_full_sha(&"g".repeat(40)));
        assert!(!is_full_sha(&"a".repeat(41)));
    }
}
