use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::transport::TransportMode;

/// Name used for the XDG config/state directories and the User-Agent.
pub const APP_NAME: &str = "gh-permalink";

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Optional configuration loaded from `~/.config/gh-permalink/config.toml`.
///
/// Every field has a default, so a partial file (or no file at all) is valid.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermalinkConfig {
    /// Base URL of the GitHub REST API (change for GitHub Enterprise).
    pub api_base: String,
    /// Transport used when `--transport` is not given on the command line.
    pub transport: TransportMode,
    /// CLI helpers tried in order by the `auto` and `helper` transports.
    pub helpers: Vec<String>,
    /// Static token sent as `Authorization: token <value>` by the direct transport.
    pub token: Option<String>,
    /// Overrides the default `gh-permalink/<version>` User-Agent.
    pub user_agent: Option<String>,
    /// Connect timeout in seconds for the direct transport (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds for the direct transport (None = no timeout).
    pub timeout_secs: Option<u64>,
}

impl Default for PermalinkConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            transport: TransportMode::Auto,
            helpers: vec!["gh".to_string(), "hub".to_string()],
            token: None,
            user_agent: None,
            connect_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

// Hand-written so the token never reaches the log file.
impl std::fmt::Debug for PermalinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermalinkConfig")
            .field("api_base", &self.api_base)
            .field("transport", &self.transport)
            .field("helpers", &self.helpers)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PermalinkConfig {
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Path of the config file, if one exists in any XDG config directory.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from the XDG config dir; defaults when no file exists.
///
/// Unlike a daemon config, nothing is written on first run.
pub fn load() -> Result<PermalinkConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(PermalinkConfig::default())
        }
    }
}

pub fn load_from(path: &Path) -> Result<PermalinkConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: PermalinkConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
