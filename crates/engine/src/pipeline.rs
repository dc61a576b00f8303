// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fix pipeline: dedup, then deliver

use crate::delivery::{DeliveryChannel, DeliveryOutcome};
use lt_adapters::{BridgeAdapter, BridgeError};
use lt_core::{Clock, Fix, TrackingSession};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Delivered,
    /// Delivery failed; the fix is in the fallback slot
    Undeliverable(BridgeError),
    /// Within the dedup floor of the last accepted fix
    Duplicate,
    /// The owning session is no longer accepting fixes
    Discarded,
}

/// Entry point every producer feeds fixes into. Safe to call concurrently.
pub struct Pipeline<B, C> {
    session: Arc<Mutex<TrackingSession>>,
    delivery: DeliveryChannel<B, C>,
}

impl<B: BridgeAdapter, C: Clock> Pipeline<B, C> {
    pub fn new(session: Arc<Mutex<TrackingSession>>, delivery: DeliveryChannel<B, C>) -> Self {
        Self { session, delivery }
    }

    pub async fn process(&self, fix: Fix) -> PipelineOutcome {
        // Dedup read-modify-write happens entirely under the session lock
        let (accepted, last) = {
            let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
            if !session.status.accepts_fixes() {
                return PipelineOutcome::Discarded;
            }
            // Any fix at all means authorization is back
            session.permission_denied = false;
            let last = session.last_accepted_millis;
            (session.try_accept(&fix), last)
        };
        if !accepted {
            let spacing_s = last.map(|l| fix.timestamp_millis.saturating_sub(l) as f64 / 1000.0);
            tracing::debug!(%fix, spacing_s, "duplicate fix dropped");
            return PipelineOutcome::Duplicate;
        }

        match self.delivery.deliver(&fix).await {
            DeliveryOutcome::Delivered => {
                tracing::info!(%fix, "fix delivered");
                PipelineOutcome::Delivered
            }
            DeliveryOutcome::Undeliverable(reason) => {
                tracing::warn!(%fix, %reason, "fix undeliverable, stored in fallback slot");
                PipelineOutcome::Undeliverable(reason)
            }
        }
    }

    /// Wait until no delivery side effect is still running
    pub async fn flush(&self) {
        self.delivery.flush().await;
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
