// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lt - live location tracker CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{daemon, last_fix, tracking};
use lt_daemon::Paths;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "lt",
    version,
    about = "Live location tracker - periodic location delivery with background survival"
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start tracking (a running session is restarted)
    Start,
    /// Stop tracking
    Stop,
    /// Restart tracking
    Restart,
    /// Show tracking status
    Status,
    /// Show the fix held for recovery when the consumer was unreachable
    LastFix,
    /// Daemon management
    Daemon(daemon::DaemonArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    let paths = Paths::from_env()?;

    match cli.command {
        Commands::Start => tracking::start(&paths, false).await,
        Commands::Restart => tracking::start(&paths, true).await,
        Commands::Stop => tracking::stop(&paths).await,
        Commands::Status => tracking::status(&paths, cli.output).await,
        Commands::LastFix => last_fix::last_fix(&paths, cli.output),
        Commands::Daemon(args) => daemon::daemon(args, &paths).await,
    }
}

/// Diagnostics on stderr, silent unless `LT_LOG` asks for them
fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("LT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
