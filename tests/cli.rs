//! End-to-end tests: run the built launcher against `sh` stub agents and
//! check the process-level exit code.

#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_config(dir: &Path, command: &str) {
    let yaml = format!("command: {:?}\n", command);
    std::fs::write(dir.join("launcher.yaml"), yaml).unwrap();
}

fn launcher(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agent-launcher"));
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("APIFY_IS_AT_HOME")
        .env_remove("APIFY_API_TOKEN")
        .env_remove("APIFY_TOKEN")
        .env_remove("OPENAI_API_KEY");
    cmd
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn successful_agent_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        r#"/bin/sh -c 'echo "$TOKEN $KEY"; test "$TOKEN" = abc && test "$KEY" = xyz'"#,
    );

    let output = launcher(temp_dir.path())
        .env("TOKEN", "abc")
        .env("KEY", "xyz")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "abc xyz");
    assert!(stderr(&output).contains("Agent executed successfully"));
}

#[test]
fn failing_agent_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "/bin/sh -c 'exit 1'");

    let output = launcher(temp_dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Agent run failed"));
}

#[test]
fn missing_agent_exits_nonzero_without_panic() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "/nonexistent/python_xyz_123 -m src.main");

    let output = launcher(temp_dir.path()).output().unwrap();
    let err = stderr(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(err.contains("failed to start '/nonexistent/python_xyz_123'"));
    assert!(!err.contains("panicked"));
}

#[test]
fn token_fallback_is_forwarded_under_primary_name() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        r#"/bin/sh -c 'test "$APIFY_API_TOKEN" = legacy'"#,
    );

    let output = launcher(temp_dir.path())
        .env("APIFY_TOKEN", "legacy")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn local_runtime_reads_dotenv() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        r#"/bin/sh -c 'test "$OPENAI_API_KEY" = from-dotenv'"#,
    );
    std::fs::write(temp_dir.path().join(".env"), "OPENAI_API_KEY=from-dotenv\n").unwrap();

    let output = launcher(temp_dir.path())
        .args(["--runtime", "local"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    // The actor platform supplies its own environment; `.env` is ignored.
    let output = launcher(temp_dir.path())
        .args(["--runtime", "actor"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn invalid_default_dotenv_line_does_not_block_agent() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        r#"/bin/sh -c 'test "$OPENAI_API_KEY" = x'"#,
    );
    std::fs::write(
        temp_dir.path().join(".env"),
        "OPENAI_API_KEY=x\nthis line is not valid\n",
    )
    .unwrap();

    let output = launcher(temp_dir.path())
        .args(["--runtime", "local"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Skipping invalid env file line"));
}

#[test]
fn invalid_explicit_env_file_exits_with_config_error() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "/bin/sh -c 'exit 0'");
    std::fs::write(
        temp_dir.path().join("secrets.env"),
        "OPENAI_API_KEY=x\nthis line is not valid\n",
    )
    .unwrap();

    let output = launcher(temp_dir.path())
        .args(["--env-file", "secrets.env"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to parse env file"));
}

#[test]
fn invalid_config_exits_with_config_error() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("launcher.yaml"), "timeout_seconds: 0\n").unwrap();

    let output = launcher(temp_dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("timeout_seconds must be greater than 0"));
}

#[test]
fn missing_explicit_config_exits_with_config_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = launcher(temp_dir.path())
        .args(["--config", "does-not-exist.yaml"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to read config file"));
}

#[test]
fn timeout_kills_agent() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "/bin/sh -c 'exec sleep 10'");

    let output = launcher(temp_dir.path())
        .args(["--timeout", "1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("did not finish within 1s"));
}
