// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lt-core: data model and pure decisions for the live location tracker
//!
//! This crate provides:
//! - The fix data model and the sample deduplicator
//! - The tracking session state
//! - Clock abstraction (monotonic + wall clock)
//! - Outbound event payloads and the frame codec shared by the daemon and bridge
//! - Tracking configuration

pub mod clock;
pub mod config;
pub mod event;
pub mod fix;
pub mod session;
pub mod trigger;
pub mod wire;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, TrackingConfig};
pub use event::{Heartbeat, LocationUpdate, OutboundEvent};
pub use fix::{accept, Fix, FixSource, Position, DEDUP_FLOOR_MS};
pub use session::{SessionId, TrackingSession, TrackingStatus};
pub use trigger::Trigger;
pub use wire::WireError;
