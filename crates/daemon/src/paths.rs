// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk layout shared by the daemon and the command line

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the control socket inside the socket directory
pub const CONTROL_SOCKET: &str = "ltd.sock";

/// Default consumer bridge socket inside the socket directory
pub const CONSUMER_SOCKET: &str = "consumer.sock";

#[derive(Debug, Error)]
pub enum PathsError {
    #[error("Could not determine state directory")]
    NoStateDir,
}

/// Every file the daemon owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub state_dir: PathBuf,
    pub socket_path: PathBuf,
    /// Default location of the consumer's socket
    pub consumer_socket_path: PathBuf,
    /// Lock file, also holds the daemon PID
    pub lock_path: PathBuf,
    pub version_path: PathBuf,
    pub log_path: PathBuf,
    pub config_path: PathBuf,
    /// Present while tracking should survive a daemon restart
    pub intent_path: PathBuf,
    /// Directory holding the fallback slot
    pub fallback_dir: PathBuf,
}

impl Paths {
    /// Resolve from `XDG_STATE_HOME`/`HOME`, `LT_SOCKET_DIR` and `LT_CONFIG`
    pub fn from_env() -> Result<Self, PathsError> {
        let mut paths = Self::under(&state_dir()?, &socket_dir());
        if let Ok(config) = std::env::var("LT_CONFIG") {
            paths.config_path = PathBuf::from(config);
        }
        Ok(paths)
    }

    /// Layout rooted at explicit directories
    pub fn under(state_dir: &Path, socket_dir: &Path) -> Self {
        Self {
            state_dir: state_dir.to_path_buf(),
            socket_path: socket_dir.join(CONTROL_SOCKET),
            consumer_socket_path: socket_dir.join(CONSUMER_SOCKET),
            lock_path: state_dir.join("daemon.pid"),
            version_path: state_dir.join("daemon.version"),
            log_path: state_dir.join("daemon.log"),
            config_path: state_dir.join("ltd.toml"),
            intent_path: state_dir.join("tracking.intent"),
            fallback_dir: state_dir.to_path_buf(),
        }
    }
}

/// Get the state directory for lt
fn state_dir() -> Result<PathBuf, PathsError> {
    // Use XDG_STATE_HOME or default to ~/.local/state
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("lt"));
    }

    let home = std::env::var("HOME").map_err(|_| PathsError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/lt"))
}

/// Get the socket directory for lt
///
/// Uses /tmp/lt by default to keep paths short (macOS SUN_LEN = 104).
/// Can be overridden with LT_SOCKET_DIR for testing.
fn socket_dir() -> PathBuf {
    match std::env::var("LT_SOCKET_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from("/tmp/lt"),
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
