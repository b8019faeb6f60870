//! CLI argument parsing for the agent launcher.
//!
//! Uses clap derive macros for declarative argument definitions. None of
//! these options are forwarded to the agent process.

use crate::env::EnvSnapshot;
use crate::runtime::HostRuntime;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run the job search agent as a child process and propagate its exit status.
///
/// The agent (`python -m src.main` by default) inherits this process's
/// standard streams and environment, plus the platform access token and LLM
/// API key when present.
#[derive(Parser, Debug)]
#[command(name = "agent-launcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Launcher config file [default: ./launcher.yaml if present].
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hosting runtime; `auto` detects the actor platform from the environment.
    #[arg(long, value_enum, default_value_t = RuntimeArg::Auto)]
    pub runtime: RuntimeArg,

    /// Kill the agent after this many seconds (overrides the config file).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Dotenv file to merge into the agent environment, in any runtime.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Only log launcher warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Runtime selection on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeArg {
    Auto,
    Actor,
    Local,
}

impl RuntimeArg {
    pub fn resolve(self, snapshot: &EnvSnapshot) -> HostRuntime {
        match self {
            RuntimeArg::Auto => HostRuntime::detect(snapshot),
            RuntimeArg::Actor => HostRuntime::Actor,
            RuntimeArg::Local => HostRuntime::Local,
        }
    }
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
