// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm adapter on the tokio timer wheel

use super::{AlarmAdapter, AlarmError};
use async_trait::async_trait;
use lt_core::Trigger;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Fires `Trigger::AlarmFired` into a channel at the armed deadline
#[derive(Clone)]
pub struct TokioAlarmAdapter {
    triggers: mpsc::UnboundedSender<Trigger>,
    armed: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl TokioAlarmAdapter {
    pub fn new(triggers: mpsc::UnboundedSender<Trigger>) -> Self {
        Self {
            triggers,
            armed: Arc::new(Mutex::new(None)),
        }
    }

    fn take_armed(&self) -> Option<JoinHandle<()>> {
        self.armed.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

#[async_trait]
impl AlarmAdapter for TokioAlarmAdapter {
    async fn arm(&self, fire_at: Instant) -> Result<(), AlarmError> {
        if self.triggers.is_closed() {
            return Err(AlarmError::ArmFailed("trigger channel closed".to_string()));
        }

        let triggers = self.triggers.clone();
        let deadline = tokio::time::Instant::from_std(fire_at);
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if triggers.send(Trigger::AlarmFired).is_err() {
                tracing::warn!("alarm fired with nobody listening");
            }
        });

        let previous = self
            .armed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
        Ok(())
    }

    async fn cancel(&self) -> Result<(), AlarmError> {
        if let Some(task) = self.take_armed() {
            task.abort();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
