// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod alarm;
pub mod bridge;
pub mod location;
pub mod revive;
pub mod traced;
pub mod wake;

pub use alarm::{AlarmAdapter, AlarmError, TokioAlarmAdapter};
pub use bridge::{BridgeAdapter, BridgeError, UnixSocketBridge};
pub use location::{
    CommandLocationAdapter, ContinuousRequest, LocationAdapter, LocationError, SubscriptionId,
};
pub use revive::{CommandReviver, NoOpReviver, ReviveAdapter, ReviveError, WakeRequest};
pub use traced::{TracedAlarmAdapter, TracedBridgeAdapter, TracedLocationAdapter};
pub use wake::{InhibitWakeLock, NoOpWakeLock, WakeLockAdapter, WakeLockError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use alarm::{AlarmCall, FakeAlarmAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use bridge::FakeBridgeAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use location::{FakeLocationAdapter, LocationCall, SingleResponse};
#[cfg(any(test, feature = "test-support"))]
pub use revive::FakeReviver;
#[cfg(any(test, feature = "test-support"))]
pub use wake::FakeWakeLock;
