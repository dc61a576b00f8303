// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracking commands: start, stop, restart, status

use anyhow::Result;
use lt_daemon::Paths;

use crate::client::{ClientError, DaemonClient};
use crate::output::{self, OutputFormat, StatusView};

/// Start tracking, launching the daemon if needed
pub async fn start(paths: &Paths, restart: bool) -> Result<()> {
    let client = DaemonClient::connect_or_start(paths).await?;
    let session = client.start(restart).await?;
    let verb = if restart { "restarted" } else { "started" };
    println!("Tracking {} (session-{})", verb, session);
    Ok(())
}

pub async fn stop(paths: &Paths) -> Result<()> {
    let client = match DaemonClient::connect(paths) {
        Ok(client) => client,
        Err(ClientError::DaemonNotRunning) => {
            println!("Tracking not running");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    client.stop().await?;
    println!("Tracking stopped");
    Ok(())
}

pub async fn status(paths: &Paths, format: OutputFormat) -> Result<()> {
    let client = match DaemonClient::connect(paths) {
        Ok(client) => client,
        Err(ClientError::DaemonNotRunning) => {
            println!("Daemon not running");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let report = client.status().await?;
    output::print(&StatusView(report), format);
    Ok(())
}
