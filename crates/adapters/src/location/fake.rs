// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake location adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ContinuousRequest, LocationAdapter, LocationError, SubscriptionId};
use async_trait::async_trait;
use lt_core::Position;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Recorded location call
#[derive(Debug, Clone, PartialEq)]
pub enum LocationCall {
    Subscribe { request: ContinuousRequest },
    Unsubscribe { id: SubscriptionId },
    CheckPermission,
    LastKnown,
    RequestSingle { high_accuracy: bool, max_wait: Duration },
}

/// How `request_single` behaves
#[derive(Debug, Clone, PartialEq)]
pub enum SingleResponse {
    Fix(Position),
    Fail(LocationError),
    /// Never resolves; the caller's own timeout must fire
    Hang,
}

struct FakeLocationState {
    calls: Vec<LocationCall>,
    subscriptions: HashMap<u64, mpsc::Sender<Position>>,
    next_id: u64,
    peak_subscriptions: usize,
    permission_denied: bool,
    subscribe_fails: bool,
    last_known: Option<Position>,
    single: SingleResponse,
}

/// Fake location adapter for testing
#[derive(Clone)]
pub struct FakeLocationAdapter {
    state: Arc<Mutex<FakeLocationState>>,
}

impl Default for FakeLocationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeLocationAdapter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeLocationState {
                calls: Vec::new(),
                subscriptions: HashMap::new(),
                next_id: 0,
                peak_subscriptions: 0,
                permission_denied: false,
                subscribe_fails: false,
                last_known: None,
                single: SingleResponse::Fail(LocationError::Unavailable("no fix".to_string())),
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeLocationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LocationCall> {
        self.lock().calls.clone()
    }

    pub fn set_permission_denied(&self, denied: bool) {
        self.lock().permission_denied = denied;
    }

    pub fn set_subscribe_fails(&self, fails: bool) {
        self.lock().subscribe_fails = fails;
    }

    pub fn set_last_known(&self, position: Option<Position>) {
        self.lock().last_known = position;
    }

    pub fn set_single_response(&self, response: SingleResponse) {
        self.lock().single = response;
    }

    /// Number of subscriptions currently registered
    pub fn active_subscriptions(&self) -> usize {
        self.lock().subscriptions.len()
    }

    /// Highest number of subscriptions ever registered at once
    pub fn peak_subscriptions(&self) -> usize {
        self.lock().peak_subscriptions
    }

    /// Push a position to every active subscription.
    ///
    /// Returns how many subscriptions received it. Dropped while permission
    /// is denied, like a real provider that is authorized-gated.
    pub async fn emit(&self, position: Position) -> usize {
        let sinks: Vec<_> = {
            let state = self.lock();
            if state.permission_denied {
                return 0;
            }
            state.subscriptions.values().cloned().collect()
        };
        let mut delivered = 0;
        for sink in sinks {
            if sink.send(position).await.is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}

#[async_trait]
impl LocationAdapter for FakeLocationAdapter {
    async fn subscribe(
        &self,
        request: ContinuousRequest,
        sink: mpsc::Sender<Position>,
    ) -> Result<SubscriptionId, LocationError> {
        let mut state = self.lock();
        state.calls.push(LocationCall::Subscribe { request });
        if state.subscribe_fails {
            return Err(LocationError::Unavailable("subscribe failed".to_string()));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.subscriptions.insert(id, sink);
        state.peak_subscriptions = state.peak_subscriptions.max(state.subscriptions.len());
        Ok(SubscriptionId(id))
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), LocationError> {
        let mut state = self.lock();
        state.calls.push(LocationCall::Unsubscribe { id });
        state.subscriptions.remove(&id.0);
        Ok(())
    }

    async fn check_permission(&self) -> Result<(), LocationError> {
        let mut state = self.lock();
        state.calls.push(LocationCall::CheckPermission);
        if state.permission_denied {
            return Err(LocationError::PermissionDenied);
        }
        Ok(())
    }

    async fn last_known(&self) -> Result<Option<Position>, LocationError> {
        let mut state = self.lock();
        state.calls.push(LocationCall::LastKnown);
        if state.permission_denied {
            return Err(LocationError::PermissionDenied);
        }
        Ok(state.last_known)
    }

    async fn request_single(
        &self,
        high_accuracy: bool,
        max_wait: Duration,
    ) -> Result<Position, LocationError> {
        let response = {
            let mut state = self.lock();
            state.calls.push(LocationCall::RequestSingle {
                high_accuracy,
                max_wait,
            });
            if state.permission_denied {
                return Err(LocationError::PermissionDenied);
            }
            state.single.clone()
        };
        match response {
            SingleResponse::Fix(position) => Ok(position),
            SingleResponse::Fail(e) => Err(e),
            SingleResponse::Hang => std::future::pending().await,
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
