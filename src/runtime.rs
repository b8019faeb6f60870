//! Hosting runtime detection.
//!
//! The launcher runs either inside the actor platform, which injects every
//! variable the agent needs, or on a developer machine, where credentials
//! usually come from a `.env` file next to the project.

use crate::env::EnvSnapshot;
use std::fmt;

/// Variable the actor platform sets inside its containers.
pub const ACTOR_MARKER_VAR: &str = "APIFY_IS_AT_HOME";

/// Dotenv file read in the local runtime when `--env-file` is not given.
pub const DEFAULT_DOTENV_FILE: &str = ".env";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRuntime {
    Actor,
    Local,
}

impl HostRuntime {
    /// Detect the runtime from the captured environment.
    pub fn detect(snapshot: &EnvSnapshot) -> Self {
        match snapshot.get_str(ACTOR_MARKER_VAR).map(str::trim) {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => HostRuntime::Actor,
            _ => HostRuntime::Local,
        }
    }

    /// Whether the default `.env` file should be merged into the snapshot.
    pub fn reads_default_dotenv(self) -> bool {
        matches!(self, HostRuntime::Local)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostRuntime::Actor => "actor",
            HostRuntime::Local => "local",
        }
    }
}

impl fmt::Display for HostRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
