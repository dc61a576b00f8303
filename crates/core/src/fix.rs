// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Location fixes and the sample deduplicator
//!
//! Two independent triggers (the continuous subscription and the exact alarm)
//! can report nearly simultaneous fixes. [`accept`] enforces the dedup floor
//! so both count as one logical sample.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum spacing between accepted fixes, regardless of source
pub const DEDUP_FLOOR_MS: i64 = 30_000;

/// A raw reading from a location provider, before it is tagged with a source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "accuracy")]
    pub accuracy_meters: f64,
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64, timestamp_millis: i64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
            timestamp_millis,
        }
    }

    /// Tag this position with the trigger that produced it
    pub fn into_fix(self, source: FixSource) -> Fix {
        Fix {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy_meters: self.accuracy_meters,
            timestamp_millis: self.timestamp_millis,
            source,
        }
    }
}

/// Which trigger produced a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixSource {
    /// Long-lived provider subscription
    Continuous,
    /// Alarm firing satisfied from the provider's cached fix
    AlarmLastKnown,
    /// Alarm firing satisfied by a one-shot high-accuracy request
    AlarmHighPriority,
}

impl FixSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixSource::Continuous => "continuous",
            FixSource::AlarmLastKnown => "alarm_last_known",
            FixSource::AlarmHighPriority => "alarm_high_priority",
        }
    }

    /// Parse the wire name produced by [`FixSource::as_str`]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "continuous" => Some(FixSource::Continuous),
            "alarm_last_known" => Some(FixSource::AlarmLastKnown),
            "alarm_high_priority" => Some(FixSource::AlarmHighPriority),
            _ => None,
        }
    }
}

impl fmt::Display for FixSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single geolocation reading. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
    pub timestamp_millis: i64,
    pub source: FixSource,
}

impl Fix {
    pub fn position(&self) -> Position {
        Position::new(
            self.latitude,
            self.longitude,
            self.accuracy_meters,
            self.timestamp_millis,
        )
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6}, {:.6} ±{}m @{} ({})",
            self.latitude, self.longitude, self.accuracy_meters, self.timestamp_millis, self.source
        )
    }
}

/// Decide whether `fix` counts as a new sample.
///
/// `last_accepted_millis` is `None` until the session accepts its first fix.
/// Pure: the caller owns the read-modify-write of the last accepted timestamp
/// and must serialize it.
pub fn accept(fix: &Fix, last_accepted_millis: Option<i64>) -> bool {
    match last_accepted_millis {
        None => true,
        Some(last) => fix.timestamp_millis.saturating_sub(last) >= DEDUP_FLOOR_MS,
    }
}

#[cfg(test)]
#[path = "fix_tests.rs"]
mod tests;
