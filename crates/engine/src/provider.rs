// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fix source: continuous subscription plus one-shot requests

use crate::error::TrackingError;
use lt_adapters::{ContinuousRequest, LocationAdapter, LocationError, SubscriptionId};
use lt_core::{Fix, FixSource, Position};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

/// Authorization observed when continuous mode started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Wraps a location adapter with the session's acquisition policy
pub struct FixProvider<L> {
    location: L,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl<L: LocationAdapter> FixProvider<L> {
    pub fn new(location: L) -> Self {
        Self {
            location,
            subscription: Mutex::new(None),
        }
    }

    fn subscription(&self) -> std::sync::MutexGuard<'_, Option<SubscriptionId>> {
        self.subscription.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription().is_some()
    }

    /// Open the long-lived subscription.
    ///
    /// A no-op when already subscribed. Missing authorization is reported
    /// but the subscription is still opened, so fixes resume on their own
    /// once access is granted.
    pub async fn start_continuous(
        &self,
        request: ContinuousRequest,
        sink: mpsc::Sender<Position>,
    ) -> Result<Permission, TrackingError> {
        if self.is_subscribed() {
            return Ok(Permission::Granted);
        }

        let permission = match self.location.check_permission().await {
            Err(LocationError::PermissionDenied) => {
                tracing::warn!("location permission denied, subscribing anyway");
                Permission::Denied
            }
            _ => Permission::Granted,
        };

        let id = self.location.subscribe(request, sink).await?;
        *self.subscription() = Some(id);
        Ok(permission)
    }

    /// Close the subscription if one is open
    pub async fn stop_continuous(&self) {
        let id = self.subscription().take();
        let Some(id) = id else {
            return;
        };
        if let Err(e) = self.location.unsubscribe(id).await {
            tracing::warn!(%id, error = %e, "unsubscribe failed");
        }
    }

    /// Obtain a single fix: the cached last-known one if present, otherwise
    /// a fresh high-accuracy request bounded by `max_wait`.
    pub async fn request_once(&self, max_wait: Duration) -> Result<Fix, TrackingError> {
        match self.location.last_known().await {
            Ok(Some(position)) => return Ok(position.into_fix(FixSource::AlarmLastKnown)),
            Ok(None) => {}
            Err(LocationError::PermissionDenied) => return Err(TrackingError::PermissionDenied),
            Err(e) => tracing::debug!(error = %e, "no cached fix"),
        }

        let position = tokio::time::timeout(max_wait, self.location.request_single(true, max_wait))
            .await
            .map_err(|_| TrackingError::FixTimeout(max_wait))??;
        Ok(position.into_fix(FixSource::AlarmHighPriority))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
