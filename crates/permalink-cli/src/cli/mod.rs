//! CLI for gh-permalink.

use anyhow::{Context, Result};
use clap::Parser;
use permalink_core::config;
use permalink_core::permalink::PermalinkRequest;
use permalink_core::transport::{self, TransportMode};

/// Convert a GitHub code link into a permalink, retroactively.
#[derive(Debug, Parser)]
#[command(name = "gh-permalink", version)]
#[command(
    about = "Convert a GitHub code link into a permalink, retroactively",
    long_about = "Rewrites https://github.com/<owner>/<repo>/blob/<branch>/<path> to point at the \
                  newest commit made before the given date, so the link keeps showing what it \
                  showed back then."
)]
pub struct Cli {
    /// The link to convert.
    pub url: String,

    /// The estimated date and time at which the link was created
    /// (e.g. "2021-03-01", "yesterday", "last Tuesday", "3 weeks ago").
    pub timestamp: String,

    /// How to reach the search API: auto (gh/hub if installed, else HTTP), helper, or direct.
    #[arg(long, value_name = "MODE")]
    pub transport: Option<TransportMode>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        // Validate both inputs before touching config, helpers or the network.
        let request = PermalinkRequest::new(&self.url, &self.timestamp)?;

        let cfg = config::load().context("load config")?;
        tracing::debug!("loaded config: {:?}", cfg);
        let mode = self.transport.unwrap_or(cfg.transport);

        let search = transport::select(&cfg, mode)?;
        let permalink = request.resolve(search.as_ref())?;
        println!("{}", permalink);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
