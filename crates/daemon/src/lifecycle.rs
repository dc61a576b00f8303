// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, boot tracking, shutdown.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use lt_adapters::{
    CommandLocationAdapter, TokioAlarmAdapter, TracedAlarmAdapter, TracedBridgeAdapter,
    TracedLocationAdapter, UnixSocketBridge,
};
use lt_core::{Clock, ConfigError, SessionId, SystemClock, Trigger};
use lt_daemon::{DaemonFile, Paths, PathsError, TrackingIntent};
use lt_engine::{LifecycleController, TrackerDeps, TrackingError};
use lt_storage::FallbackStore;
use thiserror::Error;
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::host::{HostReviver, HostWakeLock};

/// Controller with concrete host adapters (wrapped with tracing)
pub type DaemonController = LifecycleController<
    TracedLocationAdapter<CommandLocationAdapter>,
    TracedAlarmAdapter<TokioAlarmAdapter>,
    TracedBridgeAdapter<UnixSocketBridge>,
    HostReviver,
    HostWakeLock,
    SystemClock,
>;

/// State shared by the accept loop and every connection
pub struct DaemonCtx {
    pub paths: Paths,
    pub controller: DaemonController,
    pub intent: TrackingIntent,
    /// When daemon started
    pub start_time: Instant,
    /// Cancelled when a client asks the daemon to exit
    pub shutdown: CancellationToken,
}

impl DaemonCtx {
    /// Start tracking on request and remember to resume it after a reboot
    pub async fn start_tracking(&self) -> Result<SessionId, TrackingError> {
        let id = self.controller.start().await?;
        if let Err(e) = self.intent.record(SystemClock.epoch_millis()) {
            warn!(error = %e, "failed to record tracking intent");
        }
        Ok(id)
    }

    /// Stop tracking on request; it stays stopped across daemon restarts
    pub async fn stop_tracking(&self) {
        self.controller.stop().await;
        if let Err(e) = self.intent.clear() {
            warn!(error = %e, "failed to clear tracking intent");
        }
    }
}

/// Daemon state during operation
pub struct DaemonState {
    pub ctx: Arc<DaemonCtx>,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Alarm firings and probe ticks awaiting dispatch
    pub triggers: mpsc::UnboundedReceiver<Trigger>,
    autostart: bool,
}

impl DaemonState {
    /// Resume tracking if it was active before the daemon went down, or
    /// if the config asks for it
    pub async fn resume_tracking(&self) {
        let recorded = self.ctx.intent.is_recorded();
        if !recorded && !self.autostart {
            return;
        }

        info!(recorded, autostart = self.autostart, "resuming tracking on boot");
        if let Err(e) = self.ctx.start_tracking().await {
            warn!(error = %e, "boot start failed");
        }
    }

    /// Shutdown the daemon gracefully
    ///
    /// The tracking intent is left in place so the next boot resumes.
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        // 1. Stop the session so the wake resource and subscription are released
        self.ctx.controller.stop().await;

        let paths = &self.ctx.paths;

        // 2. Remove socket file
        if paths.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&paths.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        // 3. Remove PID file
        if paths.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&paths.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // 4. Remove version file
        if paths.version_path.exists() {
            if let Err(e) = std::fs::remove_file(&paths.version_path) {
                warn!("Failed to remove version file: {}", e);
            }
        }

        // 5. Lock file is released automatically when self.lock_file is dropped

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Paths(#[from] PathsError),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(std::path::PathBuf, std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(paths: &Paths) -> Result<DaemonState, LifecycleError> {
    match startup_inner(paths).await {
        Ok(state) => Ok(state),
        // Another daemon owns these files
        Err(e @ LifecycleError::LockFailed(_)) => Err(e),
        Err(e) => {
            // Clean up any resources created before failure
            cleanup_on_failure(paths);
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner(paths: &Paths) -> Result<DaemonState, LifecycleError> {
    // 1. Create state and socket directories
    std::fs::create_dir_all(&paths.state_dir)?;
    if let Some(parent) = paths.socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // 2. Acquire lock file FIRST - prevents races. Not truncated until
    // locked, so a running daemon's PID survives a failed attempt.
    let mut lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&paths.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // Write version file
    std::fs::write(&paths.version_path, env!("CARGO_PKG_VERSION"))?;

    // 3. Load config BEFORE binding socket (fail fast, don't accept connections if invalid)
    let file = DaemonFile::load(&paths.config_path)?;
    info!(
        config = %paths.config_path.display(),
        sample_interval = ?file.tracking.sample_interval,
        autostart = file.autostart,
        "loaded config"
    );

    // 4. Set up adapters (wrapped with tracing for observability)
    let (trigger_tx, triggers) = mpsc::unbounded_channel();
    let bridge_socket = file
        .bridge
        .socket
        .clone()
        .unwrap_or_else(|| paths.consumer_socket_path.clone());
    let deps = TrackerDeps {
        location: TracedLocationAdapter::new(
            CommandLocationAdapter::new(file.provider.command.clone())
                .with_run_timeout(file.tracking.fix_timeout),
        ),
        alarm: TracedAlarmAdapter::new(TokioAlarmAdapter::new(trigger_tx.clone())),
        bridge: TracedBridgeAdapter::new(
            UnixSocketBridge::new(bridge_socket).with_write_timeout(file.bridge.write_timeout),
        ),
        reviver: HostReviver::from_config(&file),
        wake: HostWakeLock::from_config(&file),
        store: FallbackStore::in_dir(&paths.fallback_dir),
    };
    let controller = LifecycleController::new(deps, SystemClock, file.tracking.clone(), trigger_tx);

    // 5. Remove stale socket and bind (LAST - only after all validation passes)
    if paths.socket_path.exists() {
        std::fs::remove_file(&paths.socket_path)?;
    }
    let listener = UnixListener::bind(&paths.socket_path)
        .map_err(|e| LifecycleError::BindFailed(paths.socket_path.clone(), e))?;

    info!("Daemon started, state in {}", paths.state_dir.display());

    Ok(DaemonState {
        ctx: Arc::new(DaemonCtx {
            paths: paths.clone(),
            controller,
            intent: TrackingIntent::at(&paths.intent_path),
            start_time: Instant::now(),
            shutdown: CancellationToken::new(),
        }),
        lock_file,
        listener,
        triggers,
        autostart: file.autostart,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(paths: &Paths) {
    // Remove socket if we created it
    if paths.socket_path.exists() {
        let _ = std::fs::remove_file(&paths.socket_path);
    }

    // Remove version file
    if paths.version_path.exists() {
        let _ = std::fs::remove_file(&paths.version_path);
    }

    // Remove PID/lock file
    if paths.lock_path.exists() {
        let _ = std::fs::remove_file(&paths.lock_path);
    }
}
