//! Retention janitor (weekly background cleanup).
//!
//! - One tokio task per janitor, sleeping until the next scheduled slot.
//! - The stop signal only interrupts the sleep; a cleanup pass that already
//!   started runs to completion.
//! - Failed passes are logged and the schedule moves on to the next week.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use dailytally_core::{next_cleanup_time, Clock, RetentionTarget, SystemClock};

#[derive(Debug, Clone, Copy)]
pub struct CleanupSchedule {
    pub weekday: Weekday,
    pub hour: u32,
    pub retention_days: u32,
}

impl CleanupSchedule {
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        next_cleanup_time(now, self.weekday, self.hour)
    }
}

pub struct Janitor {
    stop_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Janitor {
    /// A janitor with no background task; `stop` is a no-op.
    pub fn disabled() -> Self {
        let (stop_tx, _) = watch::channel(true);
        Self {
            stop_tx,
            handle: Mutex::new(None),
        }
    }

    /// Spawn the cleanup loop on the current tokio runtime, driven by the
    /// wall clock.
    ///
    /// Outside a runtime no task is started and a warning is logged.
    pub fn start(target: Arc<dyn RetentionTarget>, schedule: CleanupSchedule) -> Self {
        Self::start_with_clock(target, schedule, Arc::new(SystemClock))
    }

    /// Same as [`Janitor::start`] with an explicit time source.
    pub fn start_with_clock(
        target: Arc<dyn RetentionTarget>,
        schedule: CleanupSchedule,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => {
                tracing::warn!("no tokio runtime, retention janitor not started");
                return Self::disabled();
            }
        };

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = runtime.spawn(run(target, schedule, clock, stop_rx));
        Self {
            stop_tx,
            handle: Mutex::new(Some(handle)),
        }
    }

    pub fn is_running(&self) -> bool {
        let guard = self.handle.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Signal the loop to exit. Safe to call repeatedly and from many threads.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Wait for the loop to exit. Call after `stop`.
    pub async fn wait(&self) {
        let handle = {
            let mut guard = self.handle.lock().unwrap_or_else(|e| e.into_inner());
            guard.take()
        };
        if let Some(h) = handle {
            if let Err(e) = h.await {
                tracing::error!(error = %e, "retention janitor task failed");
            }
        }
    }
}

async fn run(
    target: Arc<dyn RetentionTarget>,
    schedule: CleanupSchedule,
    clock: Arc<dyn Clock>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut next = schedule.next_after(clock.now());
    tracing::info!(
        next_run = %next,
        retention_days = schedule.retention_days,
        "retention janitor started"
    );

    loop {
        if *stop_rx.borrow() {
            break;
        }

        let wait = (next - clock.now()).to_std().unwrap_or(Duration::ZERO);
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            // Err means the sender is gone, which also means stop.
            _ = stop_rx.changed() => break,
        }

        run_once_at(target.as_ref(), schedule.retention_days, clock.now().date_naive());

        // Anchor on the nominal slot, not on when we woke up. After a suspend
        // or clock jump past that slot, skip ahead to the next future one.
        next = schedule.next_after(next);
        let now = clock.now();
        if next <= now {
            tracing::warn!(
                missed = %next,
                "retention janitor fell behind, skipping missed slots"
            );
            next = schedule.next_after(now);
        }
        tracing::debug!(next_run = %next, "retention janitor rescheduled");
    }

    tracing::info!("retention janitor stopped");
}

/// One cleanup pass for the current UTC date; failures are logged, never
/// propagated.
pub fn run_once(target: &dyn RetentionTarget, retention_days: u32) -> Option<usize> {
    run_once_at(target, retention_days, SystemClock.now().date_naive())
}

fn run_once_at(
    target: &dyn RetentionTarget,
    retention_days: u32,
    today: NaiveDate,
) -> Option<usize> {
    match target.cleanup(retention_days, today) {
        Ok(removed) => {
            tracing::info!(removed, retention_days, "retention cleanup finished");
            Some(removed)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                code = e.client_code().as_str(),
                retention_days,
                "retention cleanup failed"
            );
            None
        }
    }
}
