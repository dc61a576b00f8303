// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn empty_file_uses_defaults() {
    let file = DaemonFile::from_toml("").unwrap();

    assert_eq!(file, DaemonFile::default());
    assert!(!file.autostart);
    assert!(file.wake.inhibit);
    assert_eq!(file.provider.command, DEFAULT_PROVIDER_COMMAND);
    assert_eq!(file.bridge.socket, None);
    assert_eq!(file.bridge.write_timeout, Duration::from_secs(2));
    assert_eq!(file.revive.command, None);
}

#[test]
fn parses_every_section() {
    let file = DaemonFile::from_toml(
        r#"
autostart = true

[tracking]
sample_interval = "2m"
probe_interval = "10s"

[provider]
command = "gps-fix --json"

[bridge]
socket = "/run/consumer.sock"
write_timeout = "500ms"

[revive]
command = "wake-consumer"

[wake]
inhibit = false
"#,
    )
    .unwrap();

    assert!(file.autostart);
    assert_eq!(file.tracking.sample_interval, Duration::from_secs(120));
    assert_eq!(file.tracking.probe_interval, Duration::from_secs(10));
    assert_eq!(file.tracking.fix_timeout, Duration::from_secs(10));
    assert_eq!(file.provider.command, "gps-fix --json");
    assert_eq!(file.bridge.socket, Some(PathBuf::from("/run/consumer.sock")));
    assert_eq!(file.bridge.write_timeout, Duration::from_millis(500));
    assert_eq!(file.revive.command.as_deref(), Some("wake-consumer"));
    assert!(!file.wake.inhibit);
}

#[test]
fn unknown_keys_are_rejected() {
    let result = DaemonFile::from_toml("[bridge]\npath = \"/tmp/x\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn blank_provider_command_is_invalid() {
    let result = DaemonFile::from_toml("[provider]\ncommand = \"  \"\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = DaemonFile::load(&dir.path().join("ltd.toml")).unwrap();
    assert_eq!(file, DaemonFile::default());
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ltd.toml");
    std::fs::write(&path, "autostart = true\n").unwrap();

    let file = DaemonFile::load(&path).unwrap();
    assert!(file.autostart);
}

#[test]
fn zero_bridge_write_timeout_is_invalid() {
    let result = DaemonFile::from_toml("[bridge]\nwrite_timeout = \"0s\"\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}
