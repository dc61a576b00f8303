// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake resource adapters
//!
//! The wake resource keeps the process eligible to run while a tracking
//! session is active.

mod inhibit;
mod noop;

pub use inhibit::InhibitWakeLock;
pub use noop::NoOpWakeLock;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeWakeLock;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from wake resource operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WakeLockError {
    #[error("failed to acquire wake resource: {0}")]
    AcquireFailed(String),
    #[error("failed to release wake resource: {0}")]
    ReleaseFailed(String),
}

/// Adapter for the platform's wake-lock-equivalent resource
#[async_trait]
pub trait WakeLockAdapter: Clone + Send + Sync + 'static {
    /// Acquire the resource. Acquiring while held is a no-op.
    async fn acquire(&self) -> Result<(), WakeLockError>;

    /// Release the resource. Releasing while not held is a no-op.
    async fn release(&self) -> Result<(), WakeLockError>;
}
