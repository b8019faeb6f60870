//! Agent process launching.
//!
//! Runs the agent as a child process with:
//!
//! - Inherited stdin/stdout/stderr (no capture layer)
//! - The parent's full environment plus forwarded credentials
//! - A blocking wait, optionally supervised by a timeout
//!
//! Spawn failures, non-zero exits and timeouts all surface as a single
//! [`LaunchError`] so the hosting runtime marks the run as failed.

mod error;
mod executor;

pub use error::LaunchError;
pub use executor::run_agent;
