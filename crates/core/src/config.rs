// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracking configuration
//!
//! Durations are written in humantime form (`"5m"`, `"30s"`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Timing policy for sampling, delivery and liveness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackingConfig {
    /// Cadence of the continuous subscription and of the exact alarm
    #[serde(with = "humantime_serde")]
    pub sample_interval: Duration,
    /// Fastest rate the continuous subscription may report at
    #[serde(with = "humantime_serde")]
    pub fastest_interval: Duration,
    pub high_accuracy: bool,
    /// Cap on a one-shot high-accuracy request
    #[serde(with = "humantime_serde")]
    pub fix_timeout: Duration,
    /// Liveness probe period
    #[serde(with = "humantime_serde")]
    pub probe_interval: Duration,
    /// How long a woken consumer task may run
    #[serde(with = "humantime_serde")]
    pub revive_timeout: Duration,
    /// Extra attempts to arm the alarm before the session is abandoned
    pub scheduling_retries: u32,
    #[serde(with = "humantime_serde")]
    pub scheduling_retry_delay: Duration,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_secs(5 * 60),
            fastest_interval: Duration::from_secs(30),
            high_accuracy: true,
            fix_timeout: Duration::from_secs(10),
            probe_interval: Duration::from_secs(30),
            revive_timeout: Duration::from_secs(15),
            scheduling_retries: 2,
            scheduling_retry_delay: Duration::from_millis(250),
        }
    }
}

impl TrackingConfig {
    /// Parse from TOML text and validate
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval.is_zero() {
            return Err(ConfigError::Invalid("sample_interval must be non-zero".into()));
        }
        if self.probe_interval.is_zero() {
            return Err(ConfigError::Invalid("probe_interval must be non-zero".into()));
        }
        if self.fastest_interval > self.sample_interval {
            return Err(ConfigError::Invalid(
                "fastest_interval must not exceed sample_interval".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
