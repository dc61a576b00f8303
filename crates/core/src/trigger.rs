// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer events routed to the lifecycle controller

use serde::{Deserialize, Serialize};

/// A timer-driven event for the lifecycle controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// The exact wake alarm went off
    AlarmFired,
    /// The liveness probe period elapsed
    ProbeDue,
}
