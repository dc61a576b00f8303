// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery channel to the consumer

use lt_adapters::{BridgeAdapter, BridgeError};
use lt_core::{Clock, Fix, LocationUpdate, OutboundEvent};
use lt_storage::FallbackStore;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio_util::task::TaskTracker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Undeliverable(BridgeError),
}

/// Asks the liveness prober to revive the consumer without waiting for
/// its next period. Raises coalesce until the prober picks one up.
#[derive(Clone, Default)]
pub struct RevivalSignal {
    notify: Arc<Notify>,
}

impl RevivalSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.notify.notify_one();
    }

    pub async fn raised(&self) {
        self.notify.notified().await
    }
}

pub struct DeliveryChannel<B, C> {
    bridge: B,
    store: FallbackStore,
    clock: C,
    revival: RevivalSignal,
    /// Fallback writes running on the blocking pool
    writes: TaskTracker,
}

impl<B: BridgeAdapter, C: Clock> DeliveryChannel<B, C> {
    pub fn new(bridge: B, store: FallbackStore, clock: C, revival: RevivalSignal) -> Self {
        Self {
            bridge,
            store,
            clock,
            revival,
            writes: TaskTracker::new(),
        }
    }

    /// Hand the fix to the consumer.
    ///
    /// On failure the fix goes to the fallback slot and revival is
    /// requested. Neither failure is surfaced beyond the outcome.
    pub async fn deliver(&self, fix: &Fix) -> DeliveryOutcome {
        let now = self.clock.epoch_millis();
        let event = OutboundEvent::LocationUpdate(LocationUpdate::from_fix(fix, now));

        match self.bridge.emit(&event).await {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(reason) => {
                self.store_fallback(*fix, now).await;
                self.revival.raise();
                DeliveryOutcome::Undeliverable(reason)
            }
        }
    }

    async fn store_fallback(&self, fix: Fix, now: i64) {
        let store = self.store.clone();
        let write = self.writes.spawn_blocking(move || store.put(&fix, now));
        match write.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, %fix, "fallback write failed, fix lost"),
            Err(e) => tracing::error!(error = %e, %fix, "fallback write task failed, fix lost"),
        }
    }

    /// Wait for fallback writes already handed to the blocking pool
    pub async fn flush(&self) {
        self.writes.close();
        self.writes.wait().await;
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
