// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracking session state
//!
//! A session is created by the lifecycle controller on start and discarded on
//! stop. At most one exists at a time. The dedup read-modify-write lives
//! here so callers holding the session lock get a linearized update.

use crate::fix::{self, Fix};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Identifies one start..stop lifetime of tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Lifecycle state of the tracking controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl TrackingStatus {
    /// Whether fixes produced now belong to a live session
    pub fn accepts_fixes(&self) -> bool {
        matches!(self, TrackingStatus::Starting | TrackingStatus::Running)
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrackingStatus::Stopped => "stopped",
            TrackingStatus::Starting => "starting",
            TrackingStatus::Running => "running",
            TrackingStatus::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// State of the single active tracking session
#[derive(Debug, Clone)]
pub struct TrackingSession {
    pub id: SessionId,
    pub status: TrackingStatus,
    /// Timestamp of the last accepted fix; `None` until one is accepted
    pub last_accepted_millis: Option<i64>,
    /// Monotonic deadline of the armed alarm, if any
    pub alarm_scheduled_at: Option<Instant>,
    /// Set while the provider reports missing location authorization
    pub permission_denied: bool,
}

impl TrackingSession {
    /// Create a session in the Starting state
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            status: TrackingStatus::Starting,
            last_accepted_millis: None,
            alarm_scheduled_at: None,
            permission_denied: false,
        }
    }

    /// Run the deduplicator and record the fix if accepted.
    ///
    /// Returns false without touching state if the session is winding down.
    pub fn try_accept(&mut self, fix: &Fix) -> bool {
        if !self.status.accepts_fixes() || !fix::accept(fix, self.last_accepted_millis) {
            return false;
        }
        self.last_accepted_millis = Some(fix.timestamp_millis);
        true
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
