// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op wake resource for hosts that never suspend the daemon.

use super::{WakeLockAdapter, WakeLockError};
use async_trait::async_trait;

/// Wake resource that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpWakeLock;

impl NoOpWakeLock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WakeLockAdapter for NoOpWakeLock {
    async fn acquire(&self) -> Result<(), WakeLockError> {
        Ok(())
    }

    async fn release(&self) -> Result<(), WakeLockError> {
        Ok(())
    }
}
