//! Tracking lifecycle specs
//!
//! Start, stop, restart and status against a real daemon. The provider
//! is a shell command and the consumer socket is absent, so every fix is
//! parked in the fallback slot.

use std::time::Duration;

use crate::prelude::*;

#[test]
fn start_launches_daemon_and_tracks() {
    let temp = Project::empty();

    temp.lt()
        .args(&["start"])
        .passes()
        .stdout_has("Tracking started (session-1)");

    temp.lt()
        .args(&["status"])
        .passes()
        .stdout_has("Tracking: running")
        .stdout_has("Session: session-1")
        .stdout_has("Next alarm in:");
}

#[test]
fn stop_ends_tracking_but_keeps_daemon() {
    let temp = Project::empty();
    temp.lt().args(&["start"]).passes();

    temp.lt()
        .args(&["stop"])
        .passes()
        .stdout_has("Tracking stopped");

    temp.lt()
        .args(&["status"])
        .passes()
        .stdout_has("Tracking: stopped")
        .stdout_lacks("Session:");
}

#[test]
fn restart_replaces_the_session() {
    let temp = Project::empty();
    temp.lt().args(&["start"]).passes();

    temp.lt()
        .args(&["restart"])
        .passes()
        .stdout_has("Tracking restarted (session-2)");

    temp.lt()
        .args(&["status"])
        .passes()
        .stdout_has("Session: session-2");
}

#[test]
fn status_as_json() {
    let temp = Project::empty();
    temp.lt().args(&["start"]).passes();

    let run = temp.lt().args(&["status", "-o", "json"]).passes();
    let json: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(json["tracking"], "running");
    assert_eq!(json["session"], 1);
    assert_eq!(json["permission_denied"], false);
}

#[test]
fn undeliverable_fix_lands_in_fallback_slot() {
    let temp = Project::empty();
    temp.config(FIXED_POSITION_CONFIG);
    temp.lt().args(&["start"]).passes();

    let stored = wait_for(Duration::from_secs(10), || {
        temp.lt()
            .args(&["last-fix"])
            .passes()
            .stdout()
            .contains("Latitude: 59.329300")
    });
    assert!(stored, "fallback slot never received the fix");

    temp.lt()
        .args(&["last-fix"])
        .passes()
        .stdout_has("Source: continuous");

    temp.lt()
        .args(&["status"])
        .passes()
        .stdout_has("Last fix: 2026-01-01T00:00:00Z");
}

#[test]
fn tracking_resumes_after_daemon_restart() {
    let temp = Project::empty();
    temp.lt().args(&["start"]).passes();
    temp.lt().args(&["daemon", "stop"]).passes();

    temp.lt().args(&["daemon", "start"]).passes();

    let resumed = wait_for(Duration::from_secs(5), || {
        temp.lt()
            .args(&["status"])
            .passes()
            .stdout()
            .contains("Tracking: running")
    });
    assert!(resumed, "tracking did not resume on boot");
}

#[test]
fn stopped_tracking_stays_stopped_after_daemon_restart() {
    let temp = Project::empty();
    temp.lt().args(&["start"]).passes();
    temp.lt().args(&["stop"]).passes();
    temp.lt().args(&["daemon", "stop"]).passes();

    temp.lt().args(&["daemon", "start"]).passes();

    temp.lt()
        .args(&["status"])
        .passes()
        .stdout_has("Tracking: stopped");
}

#[test]
fn autostart_begins_tracking_on_boot() {
    let temp = Project::empty();
    temp.config("autostart = true\n\n[provider]\ncommand = \"exit 1\"\n\n[wake]\ninhibit = false\n");

    temp.lt().args(&["daemon", "start"]).passes();

    let running = wait_for(Duration::from_secs(5), || {
        temp.lt()
            .args(&["status"])
            .passes()
            .stdout()
            .contains("Tracking: running")
    });
    assert!(running, "autostart did not start tracking");
}
