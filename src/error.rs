//! Error types for the agent launcher.
//!
//! Uses thiserror for derive macros. Every launcher error maps to a process
//! exit code so the hosting runtime sees the run as failed.

use crate::exit_codes;
use crate::launcher::LaunchError;
use thiserror::Error;

/// Top-level error type for the launcher binary.
#[derive(Error, Debug)]
pub enum LauncherError {
    /// Launcher configuration (config file, env file) is missing or invalid.
    #[error("{0}")]
    Config(String),

    /// The agent process could not be started or did not succeed.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl LauncherError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::Config(_) => exit_codes::CONFIG_ERROR,
            LauncherError::Launch(_) => exit_codes::LAUNCH_FAILURE,
        }
    }
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;
