// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::alarm::{AlarmAdapter, AlarmError};
use crate::bridge::{BridgeAdapter, BridgeError};
use crate::location::{ContinuousRequest, LocationAdapter, LocationError, SubscriptionId};
use async_trait::async_trait;
use lt_core::{OutboundEvent, Position};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Wrapper that adds tracing to any LocationAdapter
#[derive(Clone)]
pub struct TracedLocationAdapter<L> {
    inner: L,
}

impl<L> TracedLocationAdapter<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<L: LocationAdapter> LocationAdapter for TracedLocationAdapter<L> {
    async fn subscribe(
        &self,
        request: ContinuousRequest,
        sink: mpsc::Sender<Position>,
    ) -> Result<SubscriptionId, LocationError> {
        let span = tracing::info_span!(
            "location.subscribe",
            interval = ?request.interval,
            high_accuracy = request.high_accuracy
        );
        let _guard = span.enter();

        let result = self.inner.subscribe(request, sink).await;
        match &result {
            Ok(id) => tracing::info!(%id, "subscribed"),
            Err(e) => tracing::error!(error = %e, "subscribe failed"),
        }
        result
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), LocationError> {
        let span = tracing::info_span!("location.unsubscribe", %id);
        let _guard = span.enter();

        let result = self.inner.unsubscribe(id).await;
        match &result {
            Ok(()) => tracing::info!("unsubscribed"),
            Err(e) => tracing::warn!(error = %e, "unsubscribe failed"),
        }
        result
    }

    async fn check_permission(&self) -> Result<(), LocationError> {
        let result = self.inner.check_permission().await;
        tracing::debug!(granted = result.is_ok(), "checked permission");
        result
    }

    async fn last_known(&self) -> Result<Option<Position>, LocationError> {
        let result = self.inner.last_known().await;
        tracing::trace!(present = ?result.as_ref().map(|p| p.is_some()).ok(), "last known");
        result
    }

    async fn request_single(
        &self,
        high_accuracy: bool,
        max_wait: Duration,
    ) -> Result<Position, LocationError> {
        let span = tracing::info_span!("location.request_single", high_accuracy, ?max_wait);
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.request_single(high_accuracy, max_wait).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(p) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                accuracy = p.accuracy_meters,
                "fix obtained"
            ),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "single fix failed"
            ),
        }
        result
    }
}

/// Wrapper that adds tracing to any BridgeAdapter
#[derive(Clone)]
pub struct TracedBridgeAdapter<B> {
    inner: B,
}

impl<B> TracedBridgeAdapter<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: BridgeAdapter> BridgeAdapter for TracedBridgeAdapter<B> {
    async fn emit(&self, event: &OutboundEvent) -> Result<(), BridgeError> {
        let span = tracing::info_span!("bridge.emit", name = event.name());
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.emit(event).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "delivered"),
            // Undeliverable is an expected condition, not an error
            Err(e) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                reason = %e,
                "undeliverable"
            ),
        }
        result
    }
}

/// Wrapper that adds tracing to any AlarmAdapter
#[derive(Clone)]
pub struct TracedAlarmAdapter<A> {
    inner: A,
}

impl<A> TracedAlarmAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: AlarmAdapter> AlarmAdapter for TracedAlarmAdapter<A> {
    async fn arm(&self, fire_at: Instant) -> Result<(), AlarmError> {
        let in_ms = fire_at.saturating_duration_since(Instant::now()).as_millis() as u64;
        let span = tracing::info_span!("alarm.arm", in_ms);
        let _guard = span.enter();

        let result = self.inner.arm(fire_at).await;
        match &result {
            Ok(()) => tracing::info!("armed"),
            Err(e) => tracing::error!(error = %e, "arm failed"),
        }
        result
    }

    async fn cancel(&self) -> Result<(), AlarmError> {
        let result = self.inner.cancel().await;
        match &result {
            Ok(()) => tracing::debug!("alarm cancelled"),
            Err(e) => tracing::warn!(error = %e, "cancel failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
