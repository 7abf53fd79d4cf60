//! The end-to-end pipeline: normalize timestamp, parse URL, resolve, substitute.

use crate::blob_url::BlobUrl;
use crate::error::PermalinkError;
use crate::resolver;
use crate::timestamp;
use crate::transport::CommitSearch;

/// A validated request: both inputs parsed, nothing sent yet.
///
/// Building one never touches the network, so bad input fails before a
/// transport is even selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermalinkRequest {
    pub blob: BlobUrl,
    /// Normalized `YYYY-MM-DD` cutoff.
    pub date: String,
}

impl PermalinkRequest {
    pub fn new(url: &str, timestamp: &str) -> Result<Self, PermalinkError> {
        let date = timestamp::normalize(timestamp)?;
        Self::with_date(url, &date)
    }

    /// Like [`PermalinkRequest::new`] with an already normalized date.
    pub fn with_date(url: &str, date: &str) -> Result<Self, PermalinkError> {
        let blob = BlobUrl::parse(url)?;
        tracing::debug!(
            "parsed {} -> repo={} ref={} path={}",
            url,
            blob.repo(),
            blob.git_ref(),
            blob.path()
        );
        Ok(Self {
            blob,
            date: date.to_string(),
        })
    }

    /// Resolve the commit and return the pinned URL.
    pub fn resolve(&self, transport: &dyn CommitSearch) -> Result<String, PermalinkError> {
        let sha = resolver::resolve(transport, self.blob.repo(), &self.date)?;
        Ok(self.blob.with_ref(&sha))
    }
}

/// Convert `url` into a permalink at the commit current before `timestamp`.
pub fn permalink_at(
    transport: &dyn CommitSearch,
    url: &str,
    timestamp: &str,
) -> Result<String, PermalinkError> {
    PermalinkRequest::new(url, timestamp)?.resolve(transport)
}
