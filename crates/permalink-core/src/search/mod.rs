//! GitHub commit-search request and response shapes.
//!
//! The query asks for commits in one repository whose committer date is
//! strictly before a calendar date, newest first, so item 0 is the answer.

mod response;

pub use response::{parse_response, CommitItem, SearchResponse};

use url::form_urlencoded;
use url::Url;

use crate::error::PermalinkError;

/// Preview media type commit search has required since its introduction.
pub const CLOAK_PREVIEW: &str = "application/vnd.github.cloak-preview";

const SEARCH_PATH: [&str; 2] = ["search", "commits"];
const SORT_FIELD: &str = "committer-date";

/// Commits in `repo` committed before `before` (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    repo: String,
    before: String,
}

impl SearchQuery {
    pub fn new(repo: &str, before: &str) -> Self {
        Self {
            repo: repo.to_string(),
            before: before.to_string(),
        }
    }

    /// The search expression, e.g. `committer-date:<2021-03-01 repo:acme/widget`.
    pub fn q(&self) -> String {
        format!("committer-date:<{} repo:{}", self.before, self.repo)
    }

    /// Encoded query string (`q=...&sort=committer-date&order=desc`).
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.q())
            .append_pair("sort", SORT_FIELD)
            .append_pair("order", "desc")
            .finish()
    }

    /// Endpoint relative to the API root, as CLI helpers (`gh api`, `hub api`) expect it.
    pub fn endpoint(&self) -> String {
        format!("{}?{}", SEARCH_PATH.join("/"), self.query_string())
    }

    /// Absolute request URL under `api_base` (which may carry a path prefix,
    /// e.g. `https://ghe.example.com/api/v3`).
    pub fn url(&self, api_base: &Url) -> Result<Url, PermalinkError> {
        let mut url = api_base.clone();
        url.path_segments_mut()
            .map_err(|_| PermalinkError::Config(format!("API base cannot carry a path: {}", api_base)))?
            .pop_if_empty()
            .extend(SEARCH_PATH);
        url.set_query(Some(&self.query_string()));
        Ok(url)
    }
}
