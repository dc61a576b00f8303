// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracking-intent marker
//!
//! Written when tracking is started on request and removed when it is
//! stopped on request. A daemon that boots and finds the marker starts
//! tracking again.

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TrackingIntent {
    path: PathBuf,
}

impl TrackingIntent {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_recorded(&self) -> bool {
        self.path.exists()
    }

    /// Record the intent, stamped with the wall-clock time it was recorded
    pub fn record(&self, epoch_millis: i64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{epoch_millis}\n"))
    }

    /// Remove the marker; already absent is fine
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
