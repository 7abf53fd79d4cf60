//! Transport through an authenticated GitHub CLI helper (`gh api` / `hub api`).
//!
//! The helper supplies the user's stored credentials, which avoids the low
//! anonymous search rate limit. For a GitHub Enterprise host, `gh` takes
//! `--hostname` and `hub` reads `GITHUB_HOST`.

use std::path::Path;
use std::process::{Command, Stdio};

use super::CommitSearch;
use crate::error::PermalinkError;
use crate::search::{SearchQuery, CLOAK_PREVIEW};

#[derive(Debug, Clone)]
pub struct HelperSearch {
    program: String,
    host: Option<String>,
}

impl HelperSearch {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            host: None,
        }
    }

    /// Target a GitHub Enterprise host instead of github.com.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// First of `candidates` whose `--version` runs successfully.
    pub fn detect(candidates: &[String]) -> Option<Self> {
        candidates
            .iter()
            .find(|program| is_available(program))
            .map(|program| Self::new(program.as_str()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn is_hub(&self) -> bool {
        Path::new(&self.program)
            .file_name()
            .is_some_and(|name| name == "hub")
    }

    fn args(&self, query: &SearchQuery) -> Vec<String> {
        let mut args = vec!["api".to_string()];
        if let Some(host) = self.host.as_deref().filter(|_| !self.is_hub()) {
            args.push("--hostname".to_string());
            args.push(host.to_string());
        }
        args.push(query.endpoint());
        args.push("-H".to_string());
        args.push(format!("Accept: {}", CLOAK_PREVIEW));
        args
    }

    fn command(&self, query: &SearchQuery) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(query)).stdin(Stdio::null());
        if let Some(host) = self.host.as_deref().filter(|_| self.is_hub()) {
            cmd.env("GITHUB_HOST", host);
        }
        cmd
    }
}

fn is_available(program: &str) -> bool {
    let status = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(s) if s.success() => true,
        Ok(s) => {
            tracing::debug!("helper {} --version exited with {}", program, s);
            false
        }
        Err(e) => {
            tracing::debug!("helper {} not runnable: {}", program, e);
            false
        }
    }
}

impl CommitSearch for HelperSearch {
    fn name(&self) -> &str {
        &self.program
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<u8>, PermalinkError> {
        tracing::debug!("running {} {}", self.program, self.args(query).join(" "));

        let output = self
            .command(query)
            .output()
            .map_err(|e| PermalinkError::Transport(format!("{} api: {}", self.program, e)))?;

        if !output.status.success() {
            // The helper prints the API error body on stdout and its own message on stderr.
            let mut body = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !body.is_empty() && !body.ends_with('\n') {
                    body.push('\n');
                }
                body.push_str(&stderr);
            }
            return Err(PermalinkError::Api { status: None, body });
        }
        Ok(output.stdout)
    }
}
