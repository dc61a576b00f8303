// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reviver that launches a configured wake command

use super::{ReviveAdapter, ReviveError, WakeRequest};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Spawns `sh -c <command>` with the wake data in its environment.
///
/// The child is detached from the caller and killed once it outlives
/// `timeout`.
#[derive(Clone, Debug)]
pub struct CommandReviver {
    command: String,
    timeout: Duration,
}

impl CommandReviver {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ReviveAdapter for CommandReviver {
    async fn revive(&self, request: &WakeRequest) -> Result<(), ReviveError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("LT_WAKE_ACTION", &request.action)
            .env("LT_WAKE_TIMESTAMP", request.timestamp.to_string())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ReviveError::LaunchFailed(e.to_string()))?;

        let timeout = self.timeout;
        tokio::spawn(async move {
            match tokio::time::timeout(timeout, child.wait()).await {
                Ok(Ok(status)) if !status.success() => {
                    tracing::warn!(%status, "wake command failed")
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "wake command wait failed"),
                Err(_) => {
                    tracing::warn!(?timeout, "wake command timed out, killing");
                    let _ = child.kill().await;
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
