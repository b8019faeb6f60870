//! Launch failure type.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Why the agent run failed.
///
/// Callers treat every variant the same way; the variant only shapes the log
/// message.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The process could not be started (missing interpreter, permissions).
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The agent ran and reported failure, or was killed by a signal.
    #[error("agent process failed ({status})")]
    Failed { status: ExitStatus },

    /// The agent outlived the configured timeout and was killed.
    #[error("agent did not finish within {}s and was killed", .timeout.as_secs())]
    TimedOut { timeout: Duration },

    /// Waiting on the child failed.
    #[error("failed to wait for agent process: {0}")]
    Wait(#[source] io::Error),
}

impl LaunchError {
    /// Exit code reported by the agent, if it exited normally.
    pub fn agent_exit_code(&self) -> Option<i32> {
        match self {
            LaunchError::Failed { status } => status.code(),
            _ => None,
        }
    }
}
