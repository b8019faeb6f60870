//! agent-launcher: runs the job search agent as a child process.
//!
//! This is the main entry point. It captures the environment once, resolves
//! the launch configuration, runs the agent, and maps the outcome to a
//! process exit code so the hosting runtime can mark the run as failed.

mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod exit_codes;
pub mod launcher;
mod logging;
pub mod runtime;

use cli::Cli;
use config::{DEFAULT_CONFIG_FILE, LaunchConfig, LauncherConfig};
use env::EnvSnapshot;
use error::{LauncherError, Result};
use runtime::DEFAULT_DOTENV_FILE;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Launch failures were already logged with their context.
            if let LauncherError::Config(_) = err {
                error!("Launcher configuration error: {}", err);
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut snapshot = EnvSnapshot::capture();
    let runtime = cli.runtime.resolve(&snapshot);
    info!(runtime = %runtime, "Starting agent launcher");

    if let Some(path) = &cli.env_file {
        let added = snapshot.merge_dotenv(path, true)?;
        debug!(path = %path.display(), added, "Merged env file");
    } else if runtime.reads_default_dotenv() {
        let added = snapshot.merge_dotenv(Path::new(DEFAULT_DOTENV_FILE), false)?;
        if added > 0 {
            debug!(path = DEFAULT_DOTENV_FILE, added, "Merged env file");
        }
    }
    debug!(inherited_vars = snapshot.len(), "Captured environment");

    let file = match &cli.config {
        Some(path) => LauncherConfig::load(path)?,
        None => LauncherConfig::load_optional(DEFAULT_CONFIG_FILE)?.unwrap_or_default(),
    };

    let config = LaunchConfig::resolve(&file, runtime, snapshot, cli.timeout)?;
    launcher::run_agent(config)?;
    Ok(())
}
