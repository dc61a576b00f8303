// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake wake resource for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WakeLockAdapter, WakeLockError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeWakeState {
    held: bool,
    acquires: usize,
    releases: usize,
    acquire_fails: bool,
}

/// Fake wake resource that counts acquire/release transitions
#[derive(Clone, Default)]
pub struct FakeWakeLock {
    state: Arc<Mutex<FakeWakeState>>,
}

impl FakeWakeLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeWakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_held(&self) -> bool {
        self.lock().held
    }

    /// Number of acquisitions that took the resource
    pub fn acquires(&self) -> usize {
        self.lock().acquires
    }

    /// Number of releases that gave the resource back
    pub fn releases(&self) -> usize {
        self.lock().releases
    }

    pub fn set_acquire_fails(&self, fails: bool) {
        self.lock().acquire_fails = fails;
    }
}

#[async_trait]
impl WakeLockAdapter for FakeWakeLock {
    async fn acquire(&self) -> Result<(), WakeLockError> {
        let mut state = self.lock();
        if state.acquire_fails {
            return Err(WakeLockError::AcquireFailed("denied".to_string()));
        }
        if !state.held {
            state.held = true;
            state.acquires += 1;
        }
        Ok(())
    }

    async fn release(&self) -> Result<(), WakeLockError> {
        let mut state = self.lock();
        if state.held {
            state.held = false;
            state.releases += 1;
        }
        Ok(())
    }
}
