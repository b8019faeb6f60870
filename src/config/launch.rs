//! The resolved launch configuration.

use super::model::LauncherConfig;
use crate::env::{Credentials, EnvSnapshot, child_environment};
use crate::error::Result;
use crate::runtime::HostRuntime;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::time::Duration;

/// Everything the launcher needs, captured once at startup.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub program: String,
    pub args: Vec<String>,
    pub runtime: HostRuntime,
    /// Parent environment (plus `.env` values in the local runtime).
    pub inherited: EnvSnapshot,
    pub credentials: Credentials,
    /// Static overrides from `launcher.yaml`.
    pub overrides: BTreeMap<String, String>,
    /// `None` waits for the agent indefinitely.
    pub timeout: Option<Duration>,
}

impl LaunchConfig {
    /// Resolve the launch configuration.
    ///
    /// `timeout_override` (from the command line) takes precedence over the
    /// file's `timeout_seconds`.
    pub fn resolve(
        file: &LauncherConfig,
        runtime: HostRuntime,
        inherited: EnvSnapshot,
        timeout_override: Option<u64>,
    ) -> Result<Self> {
        file.validate()?;

        let mut argv = file.argv()?;
        let program = argv.remove(0);
        let credentials =
            Credentials::lookup(&inherited, &file.access_token_vars, &file.api_key_vars);
        let timeout = timeout_override
            .or(file.timeout_seconds)
            .map(Duration::from_secs);

        Ok(Self {
            program,
            args: argv,
            runtime,
            inherited,
            credentials,
            overrides: file.environment.clone(),
            timeout,
        })
    }

    /// Environment handed to the agent process.
    pub fn child_environment(&self) -> BTreeMap<OsString, OsString> {
        child_environment(&self.inherited, &self.credentials, &self.overrides)
    }

    /// Printable command line, for logs.
    pub fn command_line(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(self.args.iter()))
    }
}
