// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Out-of-band revival of the consumer endpoint

mod command;
mod noop;

pub use command::CommandReviver;
pub use noop::NoOpReviver;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeReviver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Action name carried in every wake request
pub const WAKE_ACTION: &str = "wake_bridge";

/// Data handed to the woken task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeRequest {
    pub action: String,
    pub timestamp: i64,
}

impl WakeRequest {
    pub fn new(timestamp: i64) -> Self {
        Self {
            action: WAKE_ACTION.to_string(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviveError {
    #[error("revival could not be launched: {0}")]
    LaunchFailed(String),
}

/// Best-effort attempt to bring the consumer endpoint back.
///
/// Must return without waiting for the woken task to finish.
#[async_trait]
pub trait ReviveAdapter: Clone + Send + Sync + 'static {
    async fn revive(&self, request: &WakeRequest) -> Result<(), ReviveError>;
}
