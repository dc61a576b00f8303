// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Location sampling engine: dual-trigger scheduling, dedup, delivery
//! with fallback, and consumer liveness probing

mod alarm;
mod controller;
mod delivery;
mod error;
mod pipeline;
mod prober;
mod provider;

pub use alarm::{AlarmScheduler, AlarmState, ArmRetry};
pub use controller::{LifecycleController, StatusSnapshot, TrackerDeps};
pub use delivery::{DeliveryChannel, DeliveryOutcome, RevivalSignal};
pub use error::TrackingError;
pub use pipeline::{Pipeline, PipelineOutcome};
pub use prober::{Liveness, LivenessProber};
pub use provider::{FixProvider, Permission};
