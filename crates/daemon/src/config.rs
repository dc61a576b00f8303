// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration file (`ltd.toml`)
//!
//! ```toml
//! autostart = true
//!
//! [tracking]
//! sample_interval = "5m"
//!
//! [provider]
//! command = "gps-fix --json"
//!
//! [bridge]
//! socket = "/run/user/1000/consumer.sock"
//! write_timeout = "2s"
//!
//! [revive]
//! command = "systemctl --user start consumer.service"
//!
//! [wake]
//! inhibit = false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use lt_adapters::bridge::DEFAULT_WRITE_TIMEOUT;
use lt_core::{ConfigError, TrackingConfig};
use serde::{Deserialize, Serialize};

/// Default command asked for a position
pub const DEFAULT_PROVIDER_COMMAND: &str = "lt-locate";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonFile {
    /// Start tracking whenever the daemon boots
    pub autostart: bool,
    pub tracking: TrackingConfig,
    pub provider: ProviderSection,
    pub bridge: BridgeSection,
    pub revive: ReviveSection,
    pub wake: WakeSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSection {
    /// Shell command printing one JSON position
    pub command: String,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            command: DEFAULT_PROVIDER_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeSection {
    /// Consumer socket; the socket directory's `consumer.sock` when unset
    pub socket: Option<PathBuf>,
    /// Bound on connecting to the consumer and writing one event
    #[serde(with = "humantime_serde")]
    pub write_timeout: Duration,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            socket: None,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviveSection {
    /// Command that wakes the consumer; revival is skipped when unset
    pub command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WakeSection {
    /// Hold a sleep inhibitor while tracking
    pub inhibit: bool,
}

impl Default for WakeSection {
    fn default() -> Self {
        Self { inhibit: true }
    }
}

impl DaemonFile {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let file: Self = toml::from_str(text)?;
        file.validate()?;
        Ok(file)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Read(path.to_path_buf(), e)),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.command.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "provider.command must not be empty".to_string(),
            ));
        }
        if self.bridge.write_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "bridge.write_timeout must be positive".to_string(),
            ));
        }
        self.tracking.validate()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
