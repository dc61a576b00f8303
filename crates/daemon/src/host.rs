// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host adapter selection
//!
//! Reviver and wake resource are chosen by configuration at startup; these
//! enums let the controller keep a single concrete type for each.

use async_trait::async_trait;
use lt_adapters::{
    CommandReviver, InhibitWakeLock, NoOpReviver, NoOpWakeLock, ReviveAdapter, ReviveError,
    WakeLockAdapter, WakeLockError, WakeRequest,
};
use lt_daemon::DaemonFile;

#[derive(Clone)]
pub enum HostReviver {
    Command(CommandReviver),
    Disabled(NoOpReviver),
}

impl HostReviver {
    pub fn from_config(file: &DaemonFile) -> Self {
        match &file.revive.command {
            Some(command) => Self::Command(CommandReviver::new(
                command.clone(),
                file.tracking.revive_timeout,
            )),
            None => Self::Disabled(NoOpReviver::new()),
        }
    }
}

#[async_trait]
impl ReviveAdapter for HostReviver {
    async fn revive(&self, request: &WakeRequest) -> Result<(), ReviveError> {
        match self {
            Self::Command(inner) => inner.revive(request).await,
            Self::Disabled(inner) => inner.revive(request).await,
        }
    }
}

#[derive(Clone)]
pub enum HostWakeLock {
    Inhibit(InhibitWakeLock),
    Disabled(NoOpWakeLock),
}

impl HostWakeLock {
    pub fn from_config(file: &DaemonFile) -> Self {
        if file.wake.inhibit {
            Self::Inhibit(InhibitWakeLock::new())
        } else {
            Self::Disabled(NoOpWakeLock::new())
        }
    }
}

#[async_trait]
impl WakeLockAdapter for HostWakeLock {
    async fn acquire(&self) -> Result<(), WakeLockError> {
        match self {
            Self::Inhibit(inner) => inner.acquire().await,
            Self::Disabled(inner) => inner.acquire().await,
        }
    }

    async fn release(&self) -> Result<(), WakeLockError> {
        match self {
            Self::Inhibit(inner) => inner.release().await,
            Self::Disabled(inner) => inner.release().await,
        }
    }
}
