//! Binary-level tests for the `cw` CLI: log and progress output on stderr,
//! payloads on stdout.

use std::process::Command;

fn cw() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cw"));
    // Pin the environment so resolution and filtering are deterministic.
    cmd.env_remove("CW_LOG")
        .env_remove("RUST_LOG")
        .env_remove("CW_CONFIG")
        .env_remove("CW_CONFIG_DIR")
        .env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

#[test]
fn failure_logs_error_on_stderr_without_env_filter() {
    let out = cw()
        .args(["events", "--status", "bogus"])
        .output()
        .expect("run cw");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("unknown parameter: bogus"),
        "expected the error on stderr, got: {stderr:?}"
    );
}

#[test]
fn validate_emits_progress_events_on_stderr() {
    let out = cw().args(["validate", "--json"]).output().expect("run cw");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("\"validate_started\""), "stderr: {stderr:?}");
    assert!(stderr.contains("\"validate_complete\""), "stderr: {stderr:?}");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("detection_rate_pct"), "stdout: {stdout:?}");
}

#[test]
fn events_payload_stays_on_stdout() {
    let out = cw().args(["events", "--json"]).output().expect("run cw");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("\"001\""));
}
