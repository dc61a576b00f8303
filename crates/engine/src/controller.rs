// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle controller
//!
//! Owns the single tracking session: `Stopped -> Starting -> Running ->
//! Stopping -> Stopped`. Timer-driven producers (continuous fixes, alarm
//! firings, probe ticks) run against the session that was current when
//! they began; once that session is stopped their work is discarded.

use crate::alarm::{AlarmScheduler, ArmRetry};
use crate::delivery::{DeliveryChannel, RevivalSignal};
use crate::error::TrackingError;
use crate::pipeline::Pipeline;
use crate::prober::{Liveness, LivenessProber};
use crate::provider::{FixProvider, Permission};
use lt_adapters::{
    AlarmAdapter, BridgeAdapter, ContinuousRequest, LocationAdapter, ReviveAdapter,
    WakeLockAdapter,
};
use lt_core::{
    Clock, FixSource, Position, SessionId, TrackingConfig, TrackingSession, TrackingStatus,
    Trigger,
};
use lt_storage::FallbackStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Buffer between the location provider and the pipeline
const FIX_CHANNEL_CAPACITY: usize = 16;

/// Adapter dependencies of the controller
pub struct TrackerDeps<L, A, B, R, W> {
    pub location: L,
    pub alarm: A,
    pub bridge: B,
    pub reviver: R,
    pub wake: W,
    pub store: FallbackStore,
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub status: TrackingStatus,
    pub session: Option<SessionId>,
    pub uptime: Option<Duration>,
    pub last_accepted_millis: Option<i64>,
    /// Time until the armed alarm goes off
    pub alarm_in: Option<Duration>,
    pub permission_denied: bool,
    /// Why the last session ended abnormally, if it did
    pub last_error: Option<String>,
}

/// Everything that lives exactly as long as one session
struct ActiveSession<L, A, B, R, C> {
    id: SessionId,
    session: Arc<Mutex<TrackingSession>>,
    provider: FixProvider<L>,
    alarm: AlarmScheduler<A, C>,
    pipeline: Pipeline<B, C>,
    prober: LivenessProber<B, R, C>,
    revival: RevivalSignal,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    started_at: Instant,
}

impl<L, A, B, R, C> ActiveSession<L, A, B, R, C> {
    fn lock(&self) -> MutexGuard<'_, TrackingSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn status(&self) -> TrackingStatus {
        self.lock().status
    }

    fn set_status(&self, status: TrackingStatus) {
        self.lock().status = status;
    }
}

type Active<L, A, B, R, C> = Arc<ActiveSession<L, A, B, R, C>>;

pub struct LifecycleController<L, A, B, R, W, C> {
    deps: TrackerDeps<L, A, B, R, W>,
    clock: C,
    config: TrackingConfig,
    triggers: mpsc::UnboundedSender<Trigger>,
    /// Serializes start/stop so transitions never interleave
    control: tokio::sync::Mutex<()>,
    current: Mutex<Option<Active<L, A, B, R, C>>>,
    next_id: AtomicU64,
    last_error: Mutex<Option<String>>,
}

impl<L, A, B, R, W, C> LifecycleController<L, A, B, R, W, C>
where
    L: LocationAdapter,
    A: AlarmAdapter,
    B: BridgeAdapter,
    R: ReviveAdapter,
    W: WakeLockAdapter,
    C: Clock,
{
    /// Probe ticks are sent on `triggers`; alarm firings arrive however the
    /// alarm adapter delivers them. Both are dispatched back here by the host.
    pub fn new(
        deps: TrackerDeps<L, A, B, R, W>,
        clock: C,
        config: TrackingConfig,
        triggers: mpsc::UnboundedSender<Trigger>,
    ) -> Self {
        Self {
            deps,
            clock,
            config,
            triggers,
            control: tokio::sync::Mutex::new(()),
            current: Mutex::new(None),
            next_id: AtomicU64::new(0),
            last_error: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    fn current(&self) -> Option<Active<L, A, B, R, C>> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_current(&self, active: Option<Active<L, A, B, R, C>>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = active;
    }

    fn set_last_error(&self, error: Option<String>) {
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = error;
    }

    /// The current session, only if it is fully running
    fn running(&self) -> Option<Active<L, A, B, R, C>> {
        self.current()
            .filter(|active| active.status() == TrackingStatus::Running)
    }

    /// Start tracking. An existing session is fully stopped first.
    pub async fn start(&self) -> Result<SessionId, TrackingError> {
        let _control = self.control.lock().await;

        if let Some(active) = self.current() {
            tracing::info!(session = %active.id, "start while active, restarting");
            self.teardown(&active).await;
        }

        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let active = Arc::new(self.build_session(id));
        self.set_current(Some(active.clone()));
        self.set_last_error(None);
        tracing::info!(session = %id, "starting");

        match self.bring_up(&active).await {
            Ok(()) => {
                active.set_status(TrackingStatus::Running);
                tracing::info!(session = %id, "running");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(session = %id, error = %e, "start failed");
                self.teardown(&active).await;
                self.set_last_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Stop tracking. A no-op when already stopped.
    pub async fn stop(&self) {
        let _control = self.control.lock().await;
        match self.current() {
            Some(active) => self.teardown(&active).await,
            None => tracing::debug!("stop while stopped"),
        }
    }

    /// Handle a wake alarm firing: take one fix, then re-arm.
    ///
    /// Ignored unless running. Returns an error only when re-arming failed,
    /// in which case the session has already been stopped.
    pub async fn on_alarm_fired(&self) -> Result<(), TrackingError> {
        let Some(active) = self.running() else {
            tracing::debug!("alarm fired while not running, ignoring");
            return Ok(());
        };
        if !active.alarm.mark_fired().await {
            tracing::debug!(session = %active.id, "no alarm due, ignoring firing");
            return Ok(());
        }

        match active.provider.request_once(self.config.fix_timeout).await {
            Ok(fix) => {
                active.pipeline.process(fix).await;
            }
            Err(TrackingError::PermissionDenied) => {
                active.lock().permission_denied = true;
                tracing::warn!(session = %active.id, "alarm fix skipped: permission denied");
            }
            Err(e) => tracing::warn!(session = %active.id, error = %e, "alarm fix failed"),
        }

        // Re-arm no matter how the fix request went
        match active.alarm.schedule(self.config.sample_interval).await {
            Ok(Some(fire_at)) => {
                active.lock().alarm_scheduled_at = Some(fire_at);
                Ok(())
            }
            Ok(None) => {
                tracing::debug!(session = %active.id, "session stopped during firing");
                Ok(())
            }
            Err(e) => {
                tracing::error!(session = %active.id, error = %e, "cannot keep sampling, stopping");
                self.fail(&active, &e).await;
                Err(e)
            }
        }
    }

    /// Handle a probe period. Returns `None` when ignored.
    pub async fn on_probe_due(&self) -> Option<Liveness> {
        let Some(active) = self.running() else {
            tracing::debug!("probe due while not running, ignoring");
            return None;
        };
        Some(active.prober.tick().await)
    }

    /// Dispatch a trigger to its handler
    pub async fn dispatch(&self, trigger: Trigger) -> Result<(), TrackingError> {
        match trigger {
            Trigger::AlarmFired => self.on_alarm_fired().await,
            Trigger::ProbeDue => {
                self.on_probe_due().await;
                Ok(())
            }
        }
    }

    pub fn status(&self) -> StatusSnapshot {
        let last_error = self
            .last_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let Some(active) = self.current() else {
            return StatusSnapshot {
                status: TrackingStatus::Stopped,
                session: None,
                uptime: None,
                last_accepted_millis: None,
                alarm_in: None,
                permission_denied: false,
                last_error,
            };
        };

        let now = self.clock.now();
        let session = active.lock().clone();
        StatusSnapshot {
            status: session.status,
            session: Some(session.id),
            uptime: Some(now.saturating_duration_since(active.started_at)),
            last_accepted_millis: session.last_accepted_millis,
            alarm_in: session
                .alarm_scheduled_at
                .map(|at| at.saturating_duration_since(now)),
            permission_denied: session.permission_denied,
            last_error,
        }
    }

    fn build_session(&self, id: SessionId) -> ActiveSession<L, A, B, R, C> {
        let session = Arc::new(Mutex::new(TrackingSession::new(id)));
        let revival = RevivalSignal::new();
        let delivery = DeliveryChannel::new(
            self.deps.bridge.clone(),
            self.deps.store.clone(),
            self.clock.clone(),
            revival.clone(),
        );
        let retry = ArmRetry {
            attempts: self.config.scheduling_retries,
            delay: self.config.scheduling_retry_delay,
        };

        ActiveSession {
            id,
            session: session.clone(),
            provider: FixProvider::new(self.deps.location.clone()),
            alarm: AlarmScheduler::new(self.deps.alarm.clone(), self.clock.clone(), retry),
            pipeline: Pipeline::new(session, delivery),
            prober: LivenessProber::new(
                self.deps.bridge.clone(),
                self.deps.reviver.clone(),
                self.clock.clone(),
            ),
            revival,
            cancel: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
            started_at: self.clock.now(),
        }
    }

    async fn bring_up(&self, active: &Active<L, A, B, R, C>) -> Result<(), TrackingError> {
        self.deps
            .wake
            .acquire()
            .await
            .map_err(|e| TrackingError::WakeResource(e.to_string()))?;

        let request = ContinuousRequest {
            interval: self.config.sample_interval,
            fastest_interval: self.config.fastest_interval,
            high_accuracy: self.config.high_accuracy,
        };
        let (tx, rx) = mpsc::channel(FIX_CHANNEL_CAPACITY);
        if active.provider.start_continuous(request, tx).await? == Permission::Denied {
            active.lock().permission_denied = true;
        }

        let fire_at = active.alarm.schedule(self.config.sample_interval).await?;
        active.lock().alarm_scheduled_at = fire_at;

        let tasks = vec![
            tokio::spawn(forward_fixes(active.clone(), rx)),
            tokio::spawn(probe_ticker(
                active.cancel.clone(),
                self.config.probe_interval,
                self.triggers.clone(),
            )),
            tokio::spawn(revival_listener(active.clone())),
        ];
        active
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(tasks);
        Ok(())
    }

    /// Reverse everything bring_up did. Safe on a partially started session.
    async fn teardown(&self, active: &Active<L, A, B, R, C>) {
        active.set_status(TrackingStatus::Stopping);

        active.alarm.cancel().await;
        active.provider.stop_continuous().await;
        active.cancel.cancel();
        let tasks: Vec<_> = active
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect();
        for task in &tasks {
            task.abort();
        }
        // Nothing of this session may still be delivering once it reports Stopped
        for task in tasks {
            let _ = task.await;
        }
        active.pipeline.flush().await;
        if let Err(e) = self.deps.wake.release().await {
            tracing::warn!(session = %active.id, error = %e, "wake release failed");
        }

        {
            let mut session = active.lock();
            session.status = TrackingStatus::Stopped;
            session.alarm_scheduled_at = None;
        }
        if self
            .current()
            .is_some_and(|current| Arc::ptr_eq(&current, active))
        {
            self.set_current(None);
        }
        tracing::info!(session = %active.id, "stopped");
    }

    /// Stop a session that can no longer meet its sampling guarantee
    async fn fail(&self, active: &Active<L, A, B, R, C>, error: &TrackingError) {
        let _control = self.control.lock().await;
        if self
            .current()
            .is_some_and(|current| Arc::ptr_eq(&current, active))
        {
            self.teardown(active).await;
            self.set_last_error(Some(error.to_string()));
        }
    }
}

/// Feed continuous fixes into the pipeline until the session ends
async fn forward_fixes<L, A, B, R, C>(
    active: Active<L, A, B, R, C>,
    mut rx: mpsc::Receiver<Position>,
) where
    L: LocationAdapter,
    A: AlarmAdapter,
    B: BridgeAdapter,
    R: ReviveAdapter,
    C: Clock,
{
    loop {
        tokio::select! {
            _ = active.cancel.cancelled() => break,
            position = rx.recv() => match position {
                Some(position) => {
                    active.pipeline.process(position.into_fix(FixSource::Continuous)).await;
                }
                None => break,
            },
        }
    }
}

/// Emit `ProbeDue` every `period`, first one a full period after start
async fn probe_ticker(
    cancel: CancellationToken,
    period: Duration,
    triggers: mpsc::UnboundedSender<Trigger>,
) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if triggers.send(Trigger::ProbeDue).is_err() {
                    break;
                }
            }
        }
    }
}

/// Revive immediately when delivery reports the consumer gone
async fn revival_listener<L, A, B, R, C>(active: Active<L, A, B, R, C>)
where
    L: LocationAdapter,
    A: AlarmAdapter,
    B: BridgeAdapter,
    R: ReviveAdapter,
    C: Clock,
{
    loop {
        tokio::select! {
            _ = active.cancel.cancelled() => break,
            _ = active.revival.raised() => active.prober.revive().await,
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
