// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reviver for hosts with no wake mechanism configured

use super::{ReviveAdapter, ReviveError, WakeRequest};
use async_trait::async_trait;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpReviver;

impl NoOpReviver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReviveAdapter for NoOpReviver {
    async fn revive(&self, request: &WakeRequest) -> Result<(), ReviveError> {
        tracing::debug!(timestamp = request.timestamp, "no wake command configured");
        Ok(())
    }
}
