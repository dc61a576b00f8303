//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_tracking_commands() {
    let temp = Project::empty();

    temp.lt()
        .args(&["--help"])
        .passes()
        .stdout_has("start")
        .stdout_has("stop")
        .stdout_has("restart")
        .stdout_has("status")
        .stdout_has("last-fix")
        .stdout_has("daemon");
}

#[test]
fn unknown_command_fails() {
    let temp = Project::empty();

    temp.lt()
        .args(&["teleport"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn status_without_daemon_says_so() {
    let temp = Project::empty();

    temp.lt()
        .args(&["status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn stop_without_daemon_is_harmless() {
    let temp = Project::empty();

    temp.lt()
        .args(&["stop"])
        .passes()
        .stdout_has("Tracking not running");
}
