//! Commit-search transports.
//!
//! The resolver only depends on [`CommitSearch`]; it does not know whether the
//! request goes out over libcurl or through an authenticated CLI helper.

mod direct;
mod helper;

pub use direct::CurlSearch;
pub use helper::HelperSearch;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::config::{PermalinkConfig, DEFAULT_API_BASE};
use crate::error::PermalinkError;
use crate::search::SearchQuery;

/// Performs one commit search and hands back the raw JSON body.
///
/// Implementations send `Accept: application/vnd.github.cloak-preview` and
/// map a non-success status to [`PermalinkError::Api`] with the body verbatim.
pub trait CommitSearch {
    /// Short label for logs ("direct", "gh", "hub").
    fn name(&self) -> &str;

    fn search(&self, query: &SearchQuery) -> Result<Vec<u8>, PermalinkError>;
}

/// How to pick a transport at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// First available CLI helper, else direct HTTP.
    #[default]
    Auto,
    /// A CLI helper only; fail if none is installed.
    Helper,
    /// Anonymous (or token-authenticated) HTTP via libcurl.
    Direct,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(TransportMode::Auto),
            "helper" => Ok(TransportMode::Helper),
            "direct" => Ok(TransportMode::Direct),
            other => Err(format!(
                "unknown transport {:?} (expected auto, helper or direct)",
                other
            )),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportMode::Auto => "auto",
            TransportMode::Helper => "helper",
            TransportMode::Direct => "direct",
        };
        f.write_str(s)
    }
}

/// Host a CLI helper must be pointed at, `None` for github.com.
fn helper_host(cfg: &PermalinkConfig) -> Result<Option<String>, PermalinkError> {
    let base = Url::parse(&cfg.api_base)
        .map_err(|e| PermalinkError::Config(format!("api_base {:?}: {}", cfg.api_base, e)))?;
    let default_host = Url::parse(DEFAULT_API_BASE)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    match base.host_str() {
        Some(host) if Some(host) != default_host.as_deref() => Ok(Some(host.to_string())),
        _ => Ok(None),
    }
}

fn detect_helper(cfg: &PermalinkConfig) -> Result<Option<HelperSearch>, PermalinkError> {
    let host = helper_host(cfg)?;
    Ok(HelperSearch::detect(&cfg.helpers).map(|helper| match host {
        Some(host) => helper.with_host(host),
        None => helper,
    }))
}

/// Build the transport for `mode`, checking `cfg.helpers` in order when needed.
pub fn select(
    cfg: &PermalinkConfig,
    mode: TransportMode,
) -> Result<Box<dyn CommitSearch>, PermalinkError> {
    let transport: Box<dyn CommitSearch> = match mode {
        TransportMode::Direct => Box::new(CurlSearch::from_config(cfg)?),
        TransportMode::Helper => Box::new(
            detect_helper(cfg)?
                .ok_or_else(|| PermalinkError::HelperUnavailable(cfg.helpers.join(", ")))?,
        ),
        TransportMode::Auto => match detect_helper(cfg)? {
            Some(helper) => Box::new(helper),
            None => Box::new(CurlSearch::from_config(cfg)?),
        },
    };
    tracing::info!("transport mode={} selected={}", mode, transport.name());
    Ok(transport)
}
