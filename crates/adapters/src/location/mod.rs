// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Location provider adapters

mod command;

pub use command::CommandLocationAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLocationAdapter, LocationCall, SingleResponse};

use async_trait::async_trait;
use lt_core::Position;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from location operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("no fix within {0:?}")]
    Timeout(Duration),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Parameters of the long-lived subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuousRequest {
    pub interval: Duration,
    pub fastest_interval: Duration,
    pub high_accuracy: bool,
}

/// Handle for an active subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Adapter for the platform's location provider
#[async_trait]
pub trait LocationAdapter: Clone + Send + Sync + 'static {
    /// Register a subscription that pushes positions into `sink`.
    ///
    /// Registration does not require permission; positions start flowing
    /// once authorization is granted.
    async fn subscribe(
        &self,
        request: ContinuousRequest,
        sink: mpsc::Sender<Position>,
    ) -> Result<SubscriptionId, LocationError>;

    /// Remove a subscription. Unknown ids are ignored.
    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), LocationError>;

    /// Fails with `PermissionDenied` when location access is not authorized
    async fn check_permission(&self) -> Result<(), LocationError>;

    /// The provider's cached fix, if it has one
    async fn last_known(&self) -> Result<Option<Position>, LocationError>;

    /// Request a single fresh fix, giving up after `max_wait`
    async fn request_single(
        &self,
        high_accuracy: bool,
        max_wait: Duration,
    ) -> Result<Position, LocationError>;
}
