//! GitHub blob URL parsing and reassembly.
//!
//! Accepted grammar:
//!
//! ```text
//! <any prefix>github.com/<owner>/<repo>/blob/<ref><path>
//! ```
//!
//! `owner`, `repo` and `ref` are non-empty and contain no `/`; `path` starts
//! with `/` and runs to the end of the input (query and fragment included).
//! The ref is kept only for diagnostics; it is replaced, never validated.

use std::fmt;

use crate::error::PermalinkError;

const HOST_MARKER: &str = "github.com/";
const BLOB_SEGMENT: &str = "blob/";

/// A decomposed `.../github.com/<owner>/<repo>/blob/<ref>/<path>` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobUrl {
    /// Everything up to and including `/blob/`.
    front: String,
    /// `owner/repo`.
    repo: String,
    git_ref: String,
    /// Leading-slash path inside the repository.
    path: String,
}

impl BlobUrl {
    /// Parse a blob URL. Fails with [`PermalinkError::MalformedUrl`] carrying the input.
    ///
    /// If `github.com/` occurs more than once, the last occurrence that
    /// yields a match wins.
    pub fn parse(url: &str) -> Result<Self, PermalinkError> {
        let malformed = || PermalinkError::MalformedUrl(url.to_string());
        if url.contains(['\n', '\r']) {
            return Err(malformed());
        }
        url.rmatch_indices(HOST_MARKER)
            .find_map(|(at, _)| split_after_host(url, at + HOST_MARKER.len()))
            .ok_or_else(malformed)
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The ref segment of the original URL (branch, tag or SHA).
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reassemble the link with `git_ref` in place of the original ref.
    pub fn with_ref(&self, git_ref: &str) -> String {
        format!("{}{}{}", self.front, git_ref, self.path)
    }
}

/// Renders the original URL.
impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.front, self.git_ref, self.path)
    }
}

/// Try to match `<owner>/<repo>/blob/<ref><path>` starting at byte `start`.
fn split_after_host(url: &str, start: usize) -> Option<BlobUrl> {
    let rest = &url[start..];
    let (owner, rest) = rest.split_once('/')?;
    let (name, rest) = rest.split_once('/')?;
    let after_blob = rest.strip_prefix(BLOB_SEGMENT)?;
    let (git_ref, path) = after_blob.split_at(after_blob.find('/')?);
    if owner.is_empty() || name.is_empty() || git_ref.is_empty() {
        return None;
    }
    let front_len = url.len() - after_blob.len();
    Some(BlobUrl {
        front: url[..front_len].to_string(),
        repo: format!("{}/{}", owner, name),
        git_ref: git_ref.to_string(),
        path: path.to_string(),
    })
}
