//! Daemon lifecycle specs
//!
//! Verify daemon start/stop/status lifecycle.

use crate::prelude::*;

#[test]
fn daemon_status_when_not_running() {
    let temp = Project::empty();

    temp.lt()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn daemon_start_reports_success() {
    let temp = Project::empty();

    temp.lt()
        .args(&["daemon", "start"])
        .passes()
        .stdout_has("Daemon started");
}

#[test]
fn daemon_start_twice_is_harmless() {
    let temp = Project::empty();
    temp.lt().args(&["daemon", "start"]).passes();

    temp.lt()
        .args(&["daemon", "start"])
        .passes()
        .stdout_has("Daemon already running");
}

#[test]
fn daemon_status_shows_running_after_start() {
    let temp = Project::empty();
    temp.lt().args(&["daemon", "start"]).passes();

    temp.lt()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Status: running")
        .stdout_has("Uptime:")
        .stdout_has("PID:")
        .stdout_has("Tracking: stopped");
}

#[test]
fn daemon_stop_reports_success() {
    let temp = Project::empty();
    temp.lt().args(&["daemon", "start"]).passes();

    temp.lt()
        .args(&["daemon", "stop"])
        .passes()
        .stdout_has("Daemon stopped");

    temp.lt()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn daemon_stop_when_not_running() {
    let temp = Project::empty();

    temp.lt()
        .args(&["daemon", "stop"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn invalid_config_fails_startup_with_reason() {
    let temp = Project::empty();
    temp.config("[tracking]\nsample_interval = \"0s\"\n");

    temp.lt()
        .args(&["daemon", "start"])
        .fails()
        .stderr_has("sample_interval must be non-zero");
}
