//! Direct HTTP transport over libcurl.

use std::time::Duration;
use url::Url;

use super::CommitSearch;
use crate::config::PermalinkConfig;
use crate::error::PermalinkError;
use crate::search::{SearchQuery, CLOAK_PREVIEW};

/// One blocking GET per search via the curl crate.
#[derive(Clone)]
pub struct CurlSearch {
    api_base: Url,
    user_agent: String,
    token: Option<String>,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl CurlSearch {
    /// Anonymous transport against `api_base` with the default User-Agent and no timeouts.
    pub fn new(api_base: Url) -> Self {
        Self {
            api_base,
            user_agent: PermalinkConfig::default().user_agent(),
            token: None,
            connect_timeout: None,
            timeout: None,
        }
    }

    pub fn from_config(cfg: &PermalinkConfig) -> Result<Self, PermalinkError> {
        let api_base = Url::parse(&cfg.api_base)
            .map_err(|e| PermalinkError::Config(format!("api_base {:?}: {}", cfg.api_base, e)))?;
        Ok(Self {
            api_base,
            user_agent: cfg.user_agent(),
            token: cfg.token.clone(),
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Accept: {}", CLOAK_PREVIEW)];
        if let Some(token) = &self.token {
            lines.push(format!("Authorization: token {}", token));
        }
        lines
    }
}

impl CommitSearch for CurlSearch {
    fn name(&self) -> &str {
        "direct"
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<u8>, PermalinkError> {
        let url = query.url(&self.api_base)?;
        tracing::debug!("GET {}", url);

        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.useragent(&self.user_agent)?;
        if let Some(d) = self.connect_timeout {
            easy.connect_timeout(d)?;
        }
        if let Some(d) = self.timeout {
            easy.timeout(d)?;
        }

        let mut list = curl::easy::List::new();
        for line in self.header_lines() {
            list.append(&line)?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        tracing::debug!("search returned HTTP {} ({} bytes)", code, body.len());
        if !(200..300).contains(&code) {
            return Err(PermalinkError::Api {
                status: Some(code),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body)
    }
}
