// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Location adapter backed by an external command
//!
//! The command prints one JSON object per run:
//! `{"latitude": .., "longitude": .., "accuracy": .., "timestamp": ..}`
//! (`timestamp` optional, epoch millis). Exit status 77 (`EX_NOPERM`) means
//! location access is not authorized.

use super::{ContinuousRequest, LocationAdapter, LocationError, SubscriptionId};
use async_trait::async_trait;
use lt_core::{Clock, Position, SystemClock};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Exit status the command uses to report missing authorization
pub const EXIT_PERMISSION_DENIED: i32 = 77;

/// Default bound on a single run of the command
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct CommandFix {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    #[serde(default)]
    timestamp: Option<i64>,
}

#[derive(Default)]
struct CommandState {
    next_id: u64,
    subscriptions: HashMap<u64, JoinHandle<()>>,
    last: Option<Position>,
}

/// Runs a shell command to obtain fixes
#[derive(Clone)]
pub struct CommandLocationAdapter {
    command: String,
    run_timeout: Duration,
    state: Arc<Mutex<CommandState>>,
}

impl CommandLocationAdapter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            run_timeout: DEFAULT_RUN_TIMEOUT,
            state: Arc::new(Mutex::new(CommandState::default())),
        }
    }

    /// Kill any run of the command that takes longer than `timeout`
    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Run the command once and cache the result as the last known fix.
    /// A run past `run_timeout` is killed and reported as `Timeout`.
    async fn run_once(&self, high_accuracy: bool) -> Result<Position, LocationError> {
        tokio::time::timeout(self.run_timeout, self.run_unbounded(high_accuracy))
            .await
            .map_err(|_| LocationError::Timeout(self.run_timeout))?
    }

    async fn run_unbounded(&self, high_accuracy: bool) -> Result<Position, LocationError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("LT_HIGH_ACCURACY", if high_accuracy { "1" } else { "0" })
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| LocationError::Unavailable(format!("spawn failed: {}", e)))?;

        if output.status.code() == Some(EXIT_PERMISSION_DENIED) {
            return Err(LocationError::PermissionDenied);
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LocationError::Unavailable(format!(
                "command exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let position = parse_output(&output.stdout)?;
        self.lock().last = Some(position);
        Ok(position)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CommandState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Parse the first non-empty line of command output
fn parse_output(stdout: &[u8]) -> Result<Position, LocationError> {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| LocationError::Unavailable("command printed nothing".to_string()))?;

    let fix: CommandFix = serde_json::from_str(line)
        .map_err(|e| LocationError::Unavailable(format!("unparseable fix: {}", e)))?;

    Ok(Position::new(
        fix.latitude,
        fix.longitude,
        fix.accuracy,
        fix.timestamp.unwrap_or_else(|| SystemClock.epoch_millis()),
    ))
}

#[async_trait]
impl LocationAdapter for CommandLocationAdapter {
    async fn subscribe(
        &self,
        request: ContinuousRequest,
        sink: mpsc::Sender<Position>,
    ) -> Result<SubscriptionId, LocationError> {
        let adapter = self.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(request.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                match adapter.run_once(request.high_accuracy).await {
                    Ok(position) => {
                        if sink.send(position).await.is_err() {
                            // Receiver gone; subscription is dead
                            break;
                        }
                    }
                    // Stay subscribed; fixes resume once access is granted
                    Err(LocationError::PermissionDenied) => {
                        tracing::debug!("location permission denied, waiting for grant")
                    }
                    Err(e) => tracing::warn!(error = %e, "continuous fix failed"),
                }
            }
        });

        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.subscriptions.insert(id, task);
        Ok(SubscriptionId(id))
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), LocationError> {
        if let Some(task) = self.lock().subscriptions.remove(&id.0) {
            task.abort();
        }
        Ok(())
    }

    async fn check_permission(&self) -> Result<(), LocationError> {
        match self.run_once(false).await {
            Err(LocationError::PermissionDenied) => Err(LocationError::PermissionDenied),
            // Any other failure says nothing about authorization
            _ => Ok(()),
        }
    }

    async fn last_known(&self) -> Result<Option<Position>, LocationError> {
        Ok(self.lock().last)
    }

    async fn request_single(
        &self,
        high_accuracy: bool,
        max_wait: Duration,
    ) -> Result<Position, LocationError> {
        tokio::time::timeout(max_wait, self.run_once(high_accuracy))
            .await
            .map_err(|_| LocationError::Timeout(max_wait))?
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
