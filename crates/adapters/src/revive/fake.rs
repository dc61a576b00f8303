// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake reviver for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ReviveAdapter, ReviveError, WakeRequest};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeReviverState {
    requests: Vec<WakeRequest>,
    fails: bool,
}

/// Fake reviver that records wake requests
#[derive(Clone, Default)]
pub struct FakeReviver {
    state: Arc<Mutex<FakeReviverState>>,
}

impl FakeReviver {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeReviverState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn requests(&self) -> Vec<WakeRequest> {
        self.lock().requests.clone()
    }

    pub fn count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn set_fails(&self, fails: bool) {
        self.lock().fails = fails;
    }
}

#[async_trait]
impl ReviveAdapter for FakeReviver {
    async fn revive(&self, request: &WakeRequest) -> Result<(), ReviveError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        if state.fails {
            return Err(ReviveError::LaunchFailed("fake failure".to_string()));
        }
        Ok(())
    }
}
