// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-slot fallback store
//!
//! Holds the most recent fix that could not be delivered. Every write
//! replaces the slot; there is no history.

use lt_core::{Fix, FixSource};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// File name of the slot inside the state directory
pub const FALLBACK_FILE: &str = "location_cache.json";

/// Errors that can occur reading or writing the slot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown fix source in slot: {0}")]
    UnknownSource(String),
}

/// The persisted slot
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackRecord {
    pub fix: Fix,
    pub recorded_at_millis: i64,
}

/// On-disk layout, flat so recovery tooling can read it without our types
#[derive(Debug, Serialize, Deserialize)]
struct SlotFile {
    last_location_time: i64,
    last_location_lat: f64,
    last_location_lng: f64,
    last_location_acc: f64,
    last_location_source: String,
    recorded_at: i64,
}

impl From<&FallbackRecord> for SlotFile {
    fn from(record: &FallbackRecord) -> Self {
        Self {
            last_location_time: record.fix.timestamp_millis,
            last_location_lat: record.fix.latitude,
            last_location_lng: record.fix.longitude,
            last_location_acc: record.fix.accuracy_meters,
            last_location_source: record.fix.source.as_str().to_string(),
            recorded_at: record.recorded_at_millis,
        }
    }
}

impl TryFrom<SlotFile> for FallbackRecord {
    type Error = StoreError;

    fn try_from(slot: SlotFile) -> Result<Self, StoreError> {
        let source = FixSource::parse(&slot.last_location_source)
            .ok_or(StoreError::UnknownSource(slot.last_location_source))?;
        Ok(Self {
            fix: Fix {
                latitude: slot.last_location_lat,
                longitude: slot.last_location_lng,
                accuracy_meters: slot.last_location_acc,
                timestamp_millis: slot.last_location_time,
                source,
            },
            recorded_at_millis: slot.recorded_at,
        })
    }
}

/// Durable single-slot cache of the last undeliverable fix
#[derive(Clone, Debug)]
pub struct FallbackStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FallbackStore {
    /// Store the slot as [`FALLBACK_FILE`] under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::at(dir.join(FALLBACK_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the slot.
    ///
    /// The write goes to a temporary file that is synced and renamed over
    /// the slot, so a crash leaves either the old record or the new one.
    pub fn put(&self, fix: &Fix, recorded_at_millis: i64) -> Result<(), StoreError> {
        let record = FallbackRecord {
            fix: *fix,
            recorded_at_millis,
        };
        let bytes = serde_json::to_vec_pretty(&SlotFile::from(&record))?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            source = %fix.source,
            timestamp = fix.timestamp_millis,
            "fallback slot written"
        );
        Ok(())
    }

    /// Read the slot, if anything has ever been written
    pub fn get(&self) -> Result<Option<FallbackRecord>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let slot: SlotFile = serde_json::from_slice(&bytes)?;
        FallbackRecord::try_from(slot).map(Some)
    }
}

#[cfg(test)]
#[path = "fallback_tests.rs"]
mod tests;
