// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon management commands

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use lt_daemon::Paths;

use crate::client::{self, ClientError, DaemonClient};
use crate::output::format_duration;

#[derive(Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon
    Start {
        /// Run in the foreground instead of detaching
        #[arg(long)]
        foreground: bool,
    },
    /// Stop the daemon (tracking resumes on next start if it was active)
    Stop,
    /// Show daemon status
    Status,
    /// Show the daemon log
    Logs {
        /// Number of trailing lines to show
        #[arg(short = 'n', long, default_value = "50")]
        lines: usize,
    },
}

pub async fn daemon(args: DaemonArgs, paths: &Paths) -> Result<()> {
    match args.command {
        DaemonCommand::Start { foreground } => start(paths, foreground).await,
        DaemonCommand::Stop => stop(paths).await,
        DaemonCommand::Status => status(paths).await,
        DaemonCommand::Logs { lines } => logs(paths, lines),
    }
}

async fn start(paths: &Paths, foreground: bool) -> Result<()> {
    if DaemonClient::connect(paths).is_ok() {
        println!("Daemon already running");
        return Ok(());
    }

    if foreground {
        let status = std::process::Command::new(client::find_ltd_binary()).status()?;
        if !status.success() {
            bail!("ltd exited with {}", status);
        }
        return Ok(());
    }

    let client = DaemonClient::connect_or_start(paths).await?;
    let version = client.hello().await?;
    println!("Daemon started (protocol {})", version);
    Ok(())
}

async fn stop(paths: &Paths) -> Result<()> {
    if client::daemon_stop(paths).await? {
        println!("Daemon stopped");
    } else {
        println!("Daemon not running");
    }
    Ok(())
}

async fn status(paths: &Paths) -> Result<()> {
    let client = match DaemonClient::connect(paths) {
        Ok(client) => client,
        Err(ClientError::DaemonNotRunning) => {
            println!("Daemon not running");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let version = client.hello().await?;
    let report = client.status().await?;
    println!("Status: running");
    println!("Protocol: {}", version);
    if let Some(pid) = client::read_daemon_pid(paths) {
        println!("PID: {}", pid);
    }
    println!(
        "Uptime: {}",
        format_duration(Duration::from_secs(report.daemon_uptime_secs))
    );
    println!("Tracking: {}", report.tracking);
    Ok(())
}

fn logs(paths: &Paths, lines: usize) -> Result<()> {
    let content = match std::fs::read_to_string(&paths.log_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("No log file found at {}", paths.log_path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    for line in tail(&content, lines) {
        println!("{}", line);
    }
    Ok(())
}

/// Last `n` lines of `content`
fn tail(content: &str, n: usize) -> Vec<&str> {
    let all: Vec<&str> = content.lines().collect();
    all[all.len().saturating_sub(n)..].to_vec()
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
