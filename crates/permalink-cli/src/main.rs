use permalink_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; a read-only state dir must not break the CLI.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        tracing::error!("{:#}", err);
        eprintln!("gh-permalink error: {:#}", err);
        std::process::exit(1);
    }
}
