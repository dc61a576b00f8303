// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake consumer bridge for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BridgeAdapter, BridgeError};
use async_trait::async_trait;
use lt_core::{LocationUpdate, OutboundEvent};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct FakeBridgeState {
    present: bool,
    rejects: bool,
    delay: Option<Duration>,
    delivered: Vec<OutboundEvent>,
    attempts: usize,
}

/// Fake bridge that records delivered events
#[derive(Clone)]
pub struct FakeBridgeAdapter {
    state: Arc<Mutex<FakeBridgeState>>,
}

impl Default for FakeBridgeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBridgeAdapter {
    /// A bridge with a live consumer
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeBridgeState {
                present: true,
                rejects: false,
                delay: None,
                delivered: Vec::new(),
                attempts: 0,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeBridgeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Simulate the consumer context appearing or disappearing
    pub fn set_present(&self, present: bool) {
        self.lock().present = present;
    }

    /// Simulate the consumer throwing on handoff
    pub fn set_rejects(&self, rejects: bool) {
        self.lock().rejects = rejects;
    }

    /// Make every emit take `delay` before the consumer sees it
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    /// Every event the consumer received
    pub fn delivered(&self) -> Vec<OutboundEvent> {
        self.lock().delivered.clone()
    }

    /// Location updates the consumer received
    pub fn locations(&self) -> Vec<LocationUpdate> {
        self.lock()
            .delivered
            .iter()
            .filter_map(|e| match e {
                OutboundEvent::LocationUpdate(u) => Some(u.clone()),
                _ => None,
            })
            .collect()
    }

    /// Heartbeats the consumer received
    pub fn heartbeats(&self) -> usize {
        self.lock()
            .delivered
            .iter()
            .filter(|e| matches!(e, OutboundEvent::Heartbeat(_)))
            .count()
    }

    /// Number of emit calls, successful or not
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }
}

#[async_trait]
impl BridgeAdapter for FakeBridgeAdapter {
    async fn emit(&self, event: &OutboundEvent) -> Result<(), BridgeError> {
        let delay = {
            let mut state = self.lock();
            state.attempts += 1;
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        if !state.present {
            return Err(BridgeError::EndpointAbsent);
        }
        if state.rejects {
            return Err(BridgeError::EndpointRejected("consumer threw".to_string()));
        }
        state.delivered.push(event.clone());
        Ok(())
    }
}
