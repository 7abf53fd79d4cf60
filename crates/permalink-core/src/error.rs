//! Error taxonomy for the permalink pipeline.
//!
//! Every variant is terminal: the CLI prints it and exits non-zero.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PermalinkError {
    /// Timestamp text could not be interpreted as a date.
    #[error("could not interpret {0:?} as a date")]
    InvalidTimestamp(String),

    /// Input is not a `https://github.com/<owner>/<repo>/blob/<ref>/<path>` link.
    #[error("not a GitHub blob URL: {0}")]
    MalformedUrl(String),

    /// The commit search returned a non-success status. `status` is `None`
    /// when the request went through a CLI helper that only reports failure.
    #[error("GitHub API request failed ({}):\n{}", status_label(.status), .body)]
    Api { status: Option<u32>, body: String },

    /// The search succeeded but nothing was committed before `date`.
    #[error("no commit found in {repo} before {date}")]
    NoMatchingCommit { repo: String, date: String },

    /// The search response was not the expected JSON shape.
    #[error("unexpected commit search response: {0}")]
    InvalidSearchResponse(String),

    /// The request could not be performed at all (DNS, connect, spawn, ...).
    #[error("commit search transport failed: {0}")]
    Transport(String),

    /// `--transport helper` was requested but none of the helpers ran.
    #[error("no GitHub CLI helper available (tried: {0})")]
    HelperUnavailable(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn status_label(status: &Option<u32>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "helper exited with failure".to_string(),
    }
}

impl From<curl::Error> for PermalinkError {
    fn from(e: curl::Error) -> Self {
        PermalinkError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_shows_status_and_body_verbatim() {
        let err = PermalinkError::Api {
            status: Some(403),
            body: r#"{"message":"API rate limit exceeded"}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("HTTP 403"));
        assert!(msg.contains(r#"{"message":"API rate limit exceeded"}"#));
    }

    #[test]
    fn api_error_without_status() {
        let err = PermalinkError::Api {
            status: None,
            body: "gh: Not Found (HTTP 404)".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("helper exited with failure"));
        assert!(msg.ends_with("gh: Not Found (HTTP 404)"));
    }

    #[test]
    fn malformed_url_carries_input() {
        let err = PermalinkError::MalformedUrl("https://example.com/not/github".into());
        assert!(err.to_string().contains("https://example.com/not/github"));
    }
}
