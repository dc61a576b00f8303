// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the tracking engine

use lt_adapters::LocationError;
use std::time::Duration;
use thiserror::Error;

/// Errors that surface from the tracking engine.
///
/// Delivery failures are absent on purpose: they are always recovered
/// through the fallback store and never reach callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("no fix within {0:?}")]
    FixTimeout(Duration),
    #[error("location provider failed: {0}")]
    Location(String),
    /// Arming the wake alarm failed after all retries; fatal to the session
    #[error("alarm scheduling failed: {0}")]
    SchedulingFailure(String),
    #[error("wake resource unavailable: {0}")]
    WakeResource(String),
}

impl From<LocationError> for TrackingError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::PermissionDenied => TrackingError::PermissionDenied,
            LocationError::Timeout(d) => TrackingError::FixTimeout(d),
            LocationError::Unavailable(msg) => TrackingError::Location(msg),
        }
    }
}
