// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exact alarm scheduler
//!
//! `Idle -> Scheduled -> Fired -> Scheduled -> ... -> Cancelled`.
//! One scheduler belongs to one session; `Cancelled` is terminal.

use crate::error::TrackingError;
use lt_adapters::AlarmAdapter;
use lt_core::Clock;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Idle,
    Scheduled { fire_at: Instant },
    Fired,
    Cancelled,
}

/// Retry policy for a failing arm call
#[derive(Debug, Clone, Copy)]
pub struct ArmRetry {
    pub attempts: u32,
    pub delay: Duration,
}

pub struct AlarmScheduler<A, C> {
    alarm: A,
    clock: C,
    retry: ArmRetry,
    // Held across the arm call so cancel() cannot interleave with it
    state: Mutex<AlarmState>,
}

impl<A: AlarmAdapter, C: Clock> AlarmScheduler<A, C> {
    pub fn new(alarm: A, clock: C, retry: ArmRetry) -> Self {
        Self {
            alarm,
            clock,
            retry,
            state: Mutex::new(AlarmState::Idle),
        }
    }

    pub async fn state(&self) -> AlarmState {
        *self.state.lock().await
    }

    /// Arm the alarm `interval` from now on the monotonic clock.
    ///
    /// Returns `Ok(None)` once cancelled. After `retry.attempts` failed
    /// retries the failure is returned as `SchedulingFailure`.
    pub async fn schedule(&self, interval: Duration) -> Result<Option<Instant>, TrackingError> {
        let mut state = self.state.lock().await;
        if *state == AlarmState::Cancelled {
            return Ok(None);
        }

        let mut attempt = 0;
        loop {
            let fire_at = self.clock.now() + interval;
            match self.alarm.arm(fire_at).await {
                Ok(()) => {
                    *state = AlarmState::Scheduled { fire_at };
                    return Ok(Some(fire_at));
                }
                Err(e) if attempt < self.retry.attempts => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %e, "alarm arm failed, retrying");
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => return Err(TrackingError::SchedulingFailure(e.to_string())),
            }
        }
    }

    /// Record a firing. Returns false if no alarm was due.
    ///
    /// A firing before the armed deadline belongs to an alarm armed by an
    /// earlier session and is ignored.
    pub async fn mark_fired(&self) -> bool {
        let mut state = self.state.lock().await;
        match *state {
            AlarmState::Scheduled { fire_at } if self.clock.now() >= fire_at => {
                *state = AlarmState::Fired;
                true
            }
            AlarmState::Scheduled { fire_at } => {
                tracing::debug!(
                    early_by = ?fire_at.saturating_duration_since(self.clock.now()),
                    "stale alarm firing"
                );
                false
            }
            _ => false,
        }
    }

    /// Disarm and refuse further schedules. Safe from any state.
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        if *state == AlarmState::Cancelled {
            return;
        }
        if let AlarmState::Scheduled { .. } = *state {
            if let Err(e) = self.alarm.cancel().await {
                tracing::warn!(error = %e, "alarm cancel failed");
            }
        }
        *state = AlarmState::Cancelled;
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
