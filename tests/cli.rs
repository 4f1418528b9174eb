//! Startup behavior of the binary for configurations that must not run.

use std::process::{Command, Output};

fn nudgemon(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nudgemon"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn nudgemon")
}

#[test]
fn test_zero_interval_exits_nonzero() {
    let output = nudgemon(&["--dry-run", "--interval-minutes", "0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interval"), "stderr: {stderr}");
    // The loop never started, so nothing was nudged.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Would move pointer"));
}

#[test]
fn test_negative_interval_exits_nonzero() {
    let output = nudgemon(&["--dry-run", "--interval-minutes", "-2"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_max_offset_exits_nonzero() {
    let output = nudgemon(&["--dry-run", "--max-offset", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_config_file_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");

    let output = nudgemon(&["--dry-run", "--config", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file not found"), "stderr: {stderr}");
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let output = nudgemon(&["--wiggle-harder"]);
    assert_eq!(output.status.code(), Some(2));
}
