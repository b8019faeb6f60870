//! Agent subprocess executor.

use super::LaunchError;
use crate::config::LaunchConfig;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Interval between `try_wait` polls when a timeout is configured.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the agent to completion.
///
/// Blocks until the child exits (or the configured timeout kills it). The
/// outcome is logged here; callers only need to turn an `Err` into a failing
/// exit code.
pub fn run_agent(config: LaunchConfig) -> Result<(), LaunchError> {
    let command_line = config.command_line();
    info!(
        command = %command_line,
        runtime = %config.runtime,
        access_token = credential_source(config.credentials.access_token.as_ref()),
        api_key = credential_source(config.credentials.api_key.as_ref()),
        "Delegating to agent process"
    );

    let started = Instant::now();
    let result = execute(&config);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(()) => info!(elapsed_ms, "Agent executed successfully"),
        Err(err) => error!(
            command = %command_line,
            exit_code = ?err.agent_exit_code(),
            elapsed_ms,
            "Agent run failed: {}",
            err
        ),
    }

    result
}

fn credential_source(var: Option<&crate::env::ForwardedVar>) -> &str {
    var.map(|v| v.source.as_str()).unwrap_or("absent")
}

fn execute(config: &LaunchConfig) -> Result<(), LaunchError> {
    let mut command = Command::new(&config.program);
    command
        .args(&config.args)
        .env_clear()
        .envs(config.child_environment())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = command.spawn().map_err(|source| LaunchError::Spawn {
        program: config.program.clone(),
        source,
    })?;

    let status = match config.timeout {
        None => child.wait().map_err(LaunchError::Wait)?,
        Some(timeout) => wait_with_timeout(&mut child, timeout)?,
    };

    if status.success() {
        Ok(())
    } else {
        Err(LaunchError::Failed { status })
    }
}

/// Wait for a child process, killing it once `timeout` has elapsed.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, LaunchError> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(LaunchError::TimedOut { timeout });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(LaunchError::Wait(e)),
        }
    }
}
