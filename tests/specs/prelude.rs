//! Shared helpers for CLI specs
//!
//! Every `Project` gets its own state and socket directories, so specs can
//! run in parallel without sharing a daemon.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use predicates::prelude::*;
use tempfile::TempDir;

/// Config used unless a spec writes its own: no sleep inhibitor, and a
/// provider that always fails
pub const QUIET_CONFIG: &str = r#"
[provider]
command = "exit 1"

[wake]
inhibit = false
"#;

/// Provider that always reports the same position
pub const FIXED_POSITION_CONFIG: &str = r#"
[provider]
command = '''echo '{"latitude": 59.3293, "longitude": 18.0686, "accuracy": 5.0, "timestamp": 1767225600000}' '''

[wake]
inhibit = false
"#;

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        project.config(QUIET_CONFIG);
        project
    }

    /// `$XDG_STATE_HOME/lt`
    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state").join("lt")
    }

    pub fn socket_dir(&self) -> PathBuf {
        self.dir.path().join("sock")
    }

    pub fn config(&self, toml: &str) {
        self.file("ltd.toml", toml);
    }

    /// Write a file relative to the state directory
    pub fn file(&self, rel: impl AsRef<Path>, content: &str) {
        let path = self.state_dir().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn lt(&self) -> CliBuilder {
        let mut cmd = assert_cmd::Command::cargo_bin("lt").unwrap();
        cmd.env("XDG_STATE_HOME", self.dir.path().join("state"))
            .env("LT_SOCKET_DIR", self.socket_dir())
            .env("LT_DAEMON_BINARY", assert_cmd::cargo::cargo_bin("ltd"))
            .env("LT_TIMEOUT_CONNECT_MS", "10000")
            .env_remove("LT_CONFIG")
            .env_remove("LT_LOG")
            .timeout(Duration::from_secs(30));
        CliBuilder { cmd }
    }
}

impl Drop for Project {
    fn drop(&mut self) {
        if self.socket_dir().join("ltd.sock").exists() {
            let _ = self.lt().cmd.args(["daemon", "stop"]).output();
        }
    }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Run and require a zero exit status
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {}\nstdout:\n{}\nstderr:\n{}",
            run.output.status,
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit status
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            predicate::str::contains(expected).eval(stdout.as_str()),
            "stdout missing {:?}:\n{}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            predicate::str::contains(unexpected).not().eval(stdout.as_str()),
            "stdout unexpectedly has {:?}:\n{}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            predicate::str::contains(expected).eval(stderr.as_str()),
            "stderr missing {:?}:\n{}",
            expected,
            stderr
        );
        self
    }
}

/// Poll `check` until it holds or `timeout` elapses
pub fn wait_for(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    check()
}
