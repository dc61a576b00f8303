// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events handed to the consuming application
//!
//! Encoded as `{"name": ..., "payload": {...}}`, matching the event names the
//! consumer registers listeners for.

use crate::fix::Fix;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Location update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    /// Fix timestamp (epoch millis)
    pub timestamp: i64,
    /// Local wall-clock time of emission, `HH:MM:SS`
    pub time: String,
    pub realtime: bool,
    pub source: String,
}

impl LocationUpdate {
    /// Build the payload for `fix`, stamping `time` from `emitted_at_millis`
    pub fn from_fix(fix: &Fix, emitted_at_millis: i64) -> Self {
        Self {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy: fix.accuracy_meters,
            timestamp: fix.timestamp_millis,
            time: local_hms(emitted_at_millis),
            realtime: true,
            source: fix.source.as_str().to_string(),
        }
    }
}

/// Keep-alive payload emitted while the consumer is reachable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Heartbeat {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            kind: "heartbeat".to_string(),
        }
    }
}

/// An event for the consuming application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload")]
pub enum OutboundEvent {
    #[serde(rename = "onRealtimeLocationUpdate")]
    LocationUpdate(LocationUpdate),
    #[serde(rename = "jsBridgeHeartbeat")]
    Heartbeat(Heartbeat),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::LocationUpdate(_) => "onRealtimeLocationUpdate",
            OutboundEvent::Heartbeat(_) => "jsBridgeHeartbeat",
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Format epoch millis as local `HH:MM:SS`
pub fn local_hms(epoch_millis: i64) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
