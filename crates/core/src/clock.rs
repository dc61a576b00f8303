// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Alarm arithmetic uses the monotonic [`Clock::now`]; timestamps handed to
//! the consumer use the wall clock [`Clock::epoch_millis`].

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic time, unaffected by wall-clock adjustments
    fn now(&self) -> Instant;

    /// Wall-clock milliseconds since the Unix epoch
    fn epoch_millis(&self) -> i64;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }
}

struct FakeTime {
    instant: Instant,
    epoch_millis: i64,
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    /// Wall-clock start used by [`FakeClock::new`] (2026-01-01T00:00:00Z)
    pub const DEFAULT_EPOCH_MILLIS: i64 = 1_767_225_600_000;

    pub fn new() -> Self {
        Self::at_epoch_millis(Self::DEFAULT_EPOCH_MILLIS)
    }

    /// Create a fake clock whose wall clock starts at `epoch_millis`
    pub fn at_epoch_millis(epoch_millis: i64) -> Self {
        Self {
            current: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                epoch_millis,
            })),
        }
    }

    /// Advance both clocks by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.instant += duration;
        current.epoch_millis += duration.as_millis() as i64;
    }

    /// Jump the wall clock without moving monotonic time
    pub fn set_epoch_millis(&self, epoch_millis: i64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.epoch_millis = epoch_millis;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).instant
    }

    fn epoch_millis(&self) -> i64 {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .epoch_millis
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
