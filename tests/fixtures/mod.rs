//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the nextstep binary built for this test run
pub fn nextstep_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nextstep"))
}

/// Creates an empty config directory that is removed when dropped.
pub fn temp_config_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp config dir")
}

/// Creates a Command whose config lives in `config_dir`, so tests never touch
/// the real user config and can share state between invocations.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(nextstep_bin());
    cmd.env("NEXTSTEP_CONFIG_DIR", config_dir);
    cmd.env_remove("NEXTSTEP_LOG");
    cmd.args(args);
    cmd
}

/// Runs `args` against a fresh config directory.
pub fn run_isolated(args: &[&str]) -> Output {
    let config_dir = temp_config_dir();
    isolated_command(args, config_dir.path())
        .output()
        .expect("Failed to execute command")
}

/// Parses stdout as JSON, failing the test with stderr on error.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}). stdout: {stdout}\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Asserts a zero exit status, printing stderr otherwise.
pub fn assert_success(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "Command should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Writes replacement content tables into `dir`, copied from the built-in
/// ones with the default roadmap renamed to `default_role`.
pub fn write_tables(dir: &Path, default_role: &str) {
    let roadmaps = include_str!("../../src/content/roadmaps.json")
        .replace("Tech Professional", default_role);
    fs::write(dir.join("roadmaps.json"), roadmaps).expect("Failed to write roadmaps.json");
    fs::write(
        dir.join("branches.json"),
        include_str!("../../src/content/branches.json"),
    )
    .expect("Failed to write branches.json");
}
