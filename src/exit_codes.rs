//! Exit code constants for the agent launcher.
//!
//! - 0: The agent process ran and exited successfully
//! - 1: Launch failure (spawn error, non-zero agent exit, signal, timeout)
//! - 2: Configuration error (unreadable or invalid launcher config / env file)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Launch failure: the agent could not be started or did not succeed.
pub const LAUNCH_FAILURE: i32 = 1;

/// Configuration error: the launcher refused to start the agent.
pub const CONFIG_ERROR: i32 = 2;
