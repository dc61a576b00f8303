// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness prober for the delivery channel

use lt_adapters::{BridgeAdapter, ReviveAdapter, WakeRequest};
use lt_core::{Clock, Heartbeat, OutboundEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    Dead,
}

pub struct LivenessProber<B, R, C> {
    bridge: B,
    reviver: R,
    clock: C,
}

impl<B: BridgeAdapter, R: ReviveAdapter, C: Clock> LivenessProber<B, R, C> {
    pub fn new(bridge: B, reviver: R, clock: C) -> Self {
        Self {
            bridge,
            reviver,
            clock,
        }
    }

    /// Check the channel by sending it a heartbeat
    pub async fn probe(&self) -> Liveness {
        let heartbeat = OutboundEvent::Heartbeat(Heartbeat::new(self.clock.epoch_millis()));
        match self.bridge.emit(&heartbeat).await {
            Ok(()) => Liveness::Alive,
            Err(e) => {
                tracing::debug!(reason = %e, "probe found channel dead");
                Liveness::Dead
            }
        }
    }

    /// Best-effort wake of the consumer; never waits for it to come up
    pub async fn revive(&self) {
        let request = WakeRequest::new(self.clock.epoch_millis());
        match self.reviver.revive(&request).await {
            Ok(()) => tracing::info!(timestamp = request.timestamp, "revival requested"),
            Err(e) => tracing::warn!(error = %e, "revival failed"),
        }
    }

    /// One probe period: probe, and revive if dead
    pub async fn tick(&self) -> Liveness {
        let liveness = self.probe().await;
        if liveness == Liveness::Dead {
            self.revive().await;
        }
        liveness
    }
}

#[cfg(test)]
#[path = "prober_tests.rs"]
mod tests;
