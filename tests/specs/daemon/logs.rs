//! Daemon logs specs

use crate::prelude::*;

#[test]
fn daemon_logs_without_log_file() {
    let temp = Project::empty();

    temp.lt()
        .args(&["daemon", "logs"])
        .passes()
        .stdout_has("No log file found");
}

#[test]
fn daemon_logs_shows_startup_marker() {
    let temp = Project::empty();
    temp.lt().args(&["daemon", "start"]).passes();

    temp.lt()
        .args(&["daemon", "logs", "--lines", "10"])
        .passes()
        .stdout_has("ltd: starting");
}

#[test]
fn daemon_logs_shows_startup_info() {
    let temp = Project::empty();
    temp.lt().args(&["daemon", "start"]).passes();

    // The log writer is non-blocking; give it a moment to flush
    let ready = wait_for(std::time::Duration::from_secs(5), || {
        temp.lt()
            .args(&["daemon", "logs"])
            .passes()
            .stdout()
            .contains("Daemon ready")
    });
    assert!(ready, "daemon log never reported readiness");
}
