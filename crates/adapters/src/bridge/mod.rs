// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer bridge adapters
//!
//! The bridge is the live path to the consuming application. It may be
//! absent or unresponsive at any time.

mod unix;

pub use unix::{UnixSocketBridge, DEFAULT_WRITE_TIMEOUT};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeBridgeAdapter;

use async_trait::async_trait;
use lt_core::OutboundEvent;
use thiserror::Error;

/// Why an event could not be handed to the consumer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No consumer context is active
    #[error("consumer endpoint absent")]
    EndpointAbsent,
    /// A consumer exists but the handoff failed
    #[error("consumer endpoint rejected event: {0}")]
    EndpointRejected(String),
}

/// Adapter for handing events to the consuming application.
///
/// Fire-and-forget: implementations must not wait for the consumer to
/// acknowledge the event.
#[async_trait]
pub trait BridgeAdapter: Clone + Send + Sync + 'static {
    async fn emit(&self, event: &OutboundEvent) -> Result<(), BridgeError>;
}
