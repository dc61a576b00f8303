// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exact wake alarm adapters

mod timer;

pub use timer::TokioAlarmAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AlarmCall, FakeAlarmAdapter};

use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;

/// Errors from alarm operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmError {
    #[error("failed to arm alarm: {0}")]
    ArmFailed(String),
    #[error("failed to cancel alarm: {0}")]
    CancelFailed(String),
}

/// Adapter for the platform's exact, wake-capable alarm.
///
/// There is a single alarm slot: arming replaces whatever was armed before.
/// Firings are reported out of band as `Trigger::AlarmFired`.
#[async_trait]
pub trait AlarmAdapter: Clone + Send + Sync + 'static {
    /// Arm the alarm for a monotonic deadline
    async fn arm(&self, fire_at: Instant) -> Result<(), AlarmError>;

    /// Disarm the alarm. Disarming an idle alarm is a no-op.
    async fn cancel(&self) -> Result<(), AlarmError>;
}
