// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read the fallback slot straight from disk

use anyhow::{Context, Result};
use lt_daemon::Paths;
use lt_storage::FallbackStore;

use crate::output::{self, FixView, OutputFormat};

pub fn last_fix(paths: &Paths, format: OutputFormat) -> Result<()> {
    let store = FallbackStore::in_dir(&paths.fallback_dir);
    let record = store
        .get()
        .with_context(|| format!("reading {}", store.path().display()))?;

    match (record, format) {
        (Some(record), _) => output::print(&FixView::from(&record), format),
        (None, OutputFormat::Text) => println!("No fallback fix recorded"),
        (None, OutputFormat::Json) => println!("null"),
    }
    Ok(())
}
