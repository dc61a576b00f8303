// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake resource backed by a `systemd-inhibit` sleep lock

use super::{WakeLockAdapter, WakeLockError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::process::{Child, Command};

const INHIBIT_ARGS: &[&str] = &[
    "--what=sleep:idle",
    "--who=ltd",
    "--why=location tracking",
    "--mode=block",
    "sleep",
    "infinity",
];

/// Holds a `systemd-inhibit` child for as long as the lock is held
#[derive(Clone)]
pub struct InhibitWakeLock {
    program: String,
    args: Vec<String>,
    child: Arc<Mutex<Option<Child>>>,
}

impl Default for InhibitWakeLock {
    fn default() -> Self {
        Self::new()
    }
}

impl InhibitWakeLock {
    pub fn new() -> Self {
        Self::with_command(
            "systemd-inhibit",
            INHIBIT_ARGS.iter().map(|a| a.to_string()).collect(),
        )
    }

    /// Hold an arbitrary long-running command as the inhibitor
    pub fn with_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            child: Arc::new(Mutex::new(None)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_held(&self) -> bool {
        self.lock().is_some()
    }
}

#[async_trait]
impl WakeLockAdapter for InhibitWakeLock {
    async fn acquire(&self) -> Result<(), WakeLockError> {
        let mut slot = self.lock();
        if slot.is_some() {
            return Ok(());
        }

        let child = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WakeLockError::AcquireFailed(format!("{}: {}", self.program, e)))?;

        tracing::debug!(pid = child.id(), "wake inhibitor started");
        *slot = Some(child);
        Ok(())
    }

    async fn release(&self) -> Result<(), WakeLockError> {
        let held = self.lock().take();
        let Some(mut child) = held else {
            return Ok(());
        };
        child
            .kill()
            .await
            .map_err(|e| WakeLockError::ReleaseFailed(e.to_string()))
    }
}

#[cfg(test)]
#[path = "inhibit_tests.rs"]
mod tests;
