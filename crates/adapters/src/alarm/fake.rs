// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake alarm adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AlarmAdapter, AlarmError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Recorded alarm call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmCall {
    Arm { fire_at: Instant },
    Cancel,
}

#[derive(Default)]
struct FakeAlarmState {
    calls: Vec<AlarmCall>,
    /// Deadlines armed and not yet fired or cancelled
    pending: Vec<Instant>,
    peak_pending: usize,
    arm_failures: u32,
    arm_always_fails: bool,
}

/// Fake alarm that records calls and counts overlapping schedules.
///
/// Unlike the single-slot platform alarm, arming twice without a fire or
/// cancel in between leaves two pending deadlines, so tests can detect a
/// double schedule.
#[derive(Clone, Default)]
pub struct FakeAlarmAdapter {
    state: Arc<Mutex<FakeAlarmState>>,
}

impl FakeAlarmAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeAlarmState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<AlarmCall> {
        self.lock().calls.clone()
    }

    /// Number of successful arm calls
    pub fn arm_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, AlarmCall::Arm { .. }))
            .count()
    }

    /// The earliest pending deadline, if armed
    pub fn armed_at(&self) -> Option<Instant> {
        self.lock().pending.iter().min().copied()
    }

    /// Number of pending alarms right now
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Highest number of simultaneously pending alarms ever observed
    pub fn peak_pending(&self) -> usize {
        self.lock().peak_pending
    }

    /// Make the next `n` arm calls fail
    pub fn fail_next_arms(&self, n: u32) {
        self.lock().arm_failures = n;
    }

    /// Make every arm call fail
    pub fn set_arm_always_fails(&self, fails: bool) {
        self.lock().arm_always_fails = fails;
    }

    /// Consume the earliest pending alarm as if it went off.
    ///
    /// Returns false if nothing was armed.
    pub fn fire(&self) -> bool {
        let mut state = self.lock();
        let Some((idx, _)) = state.pending.iter().enumerate().min_by_key(|(_, t)| **t) else {
            return false;
        };
        state.pending.remove(idx);
        true
    }
}

#[async_trait]
impl AlarmAdapter for FakeAlarmAdapter {
    async fn arm(&self, fire_at: Instant) -> Result<(), AlarmError> {
        let mut state = self.lock();
        if state.arm_always_fails {
            return Err(AlarmError::ArmFailed("exact alarms not permitted".to_string()));
        }
        if state.arm_failures > 0 {
            state.arm_failures -= 1;
            return Err(AlarmError::ArmFailed("transient arm failure".to_string()));
        }
        state.calls.push(AlarmCall::Arm { fire_at });
        state.pending.push(fire_at);
        state.peak_pending = state.peak_pending.max(state.pending.len());
        Ok(())
    }

    async fn cancel(&self) -> Result<(), AlarmError> {
        let mut state = self.lock();
        state.calls.push(AlarmCall::Cancel);
        state.pending.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
