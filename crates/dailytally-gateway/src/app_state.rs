//! Shared metrics state.
//!
//! `MetricsState` is a cheap `Clone` handle. Build it once at startup, hand
//! clones to the router and to any code that records metrics, and call
//! `shutdown` when the process stops.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use dailytally_core::{CounterStore, DailyUserTracker, Exporter, Result, RetentionTarget};

use crate::config::MetricsConfig;
use crate::janitor::{self, CleanupSchedule, Janitor};

#[derive(Clone)]
pub struct MetricsState {
    inner: Arc<MetricsStateInner>,
}

struct MetricsStateInner {
    cfg: MetricsConfig,
    counters: CounterStore,
    daily: Arc<DailyUserTracker>,
    exporter: Exporter,
    janitor: Janitor,
}

impl MetricsState {
    /// Build state from config, substituting defaults for unset fields.
    ///
    /// Starts the retention janitor when `auto_cleanup` is set and a tokio
    /// runtime is available.
    pub fn new(cfg: MetricsConfig) -> Self {
        let cfg = cfg.normalized();
        let daily = Arc::new(DailyUserTracker::new());
        let exporter = Exporter::new(cfg.service_name.clone(), cfg.historical_days);

        let janitor = if cfg.auto_cleanup {
            let target: Arc<dyn RetentionTarget> = daily.clone();
            Janitor::start(target, Self::schedule_of(&cfg))
        } else {
            Janitor::disabled()
        };

        tracing::info!(
            service = %cfg.service_name,
            admin_enabled = cfg.admin_enabled(),
            auto_cleanup = cfg.auto_cleanup,
            "metrics state ready"
        );

        Self {
            inner: Arc::new(MetricsStateInner {
                cfg,
                counters: CounterStore::new(),
                daily,
                exporter,
                janitor,
            }),
        }
    }

    fn schedule_of(cfg: &MetricsConfig) -> CleanupSchedule {
        CleanupSchedule {
            weekday: cfg.cleanup_weekday,
            hour: cfg.cleanup_hour,
            retention_days: cfg.cleanup_retention_days,
        }
    }

    pub fn cfg(&self) -> &MetricsConfig {
        &self.inner.cfg
    }

    pub fn service_name(&self) -> &str {
        &self.inner.cfg.service_name
    }

    pub fn daily_users(&self) -> &DailyUserTracker {
        &self.inner.daily
    }

    pub fn increment(&self, name: &str) {
        self.inner.counters.increment(name);
    }

    pub fn increment_by(&self, name: &str, delta: u64) {
        self.inner.counters.increment_by(name, delta);
    }

    pub fn counter_value(&self, name: &str) -> u64 {
        self.inner.counters.get(name)
    }

    pub fn track_daily_user(&self, user_id: &str) {
        self.inner.daily.track_user(user_id);
    }

    pub fn daily_user_count(&self, date_key: &str) -> u64 {
        self.inner.daily.count_for_date(date_key)
    }

    pub fn today_user_count(&self) -> u64 {
        self.inner.daily.today_count()
    }

    /// Run one cleanup pass with the configured retention window.
    pub fn cleanup_old_data(&self) -> Result<usize> {
        self.inner
            .daily
            .cleanup_old_data(self.inner.cfg.cleanup_retention_days)
    }

    /// Same as [`Self::cleanup_old_data`] but logs instead of returning errors.
    pub fn cleanup_logged(&self) -> Option<usize> {
        janitor::run_once(self.inner.daily.as_ref(), self.inner.cfg.cleanup_retention_days)
    }

    /// Render the exposition body.
    pub fn render(&self) -> String {
        self.inner
            .exporter
            .render(&self.inner.counters, &self.inner.daily)
    }

    /// True when `path` is exactly `/admin/<token>/metrics` for a configured,
    /// non-empty token. The token is compared in constant time.
    pub fn admin_path_matches(&self, path: &str) -> bool {
        let token = &self.inner.cfg.admin_secret_path;
        if token.is_empty() {
            return false;
        }
        path.strip_prefix("/admin/")
            .and_then(|rest| rest.strip_suffix("/metrics"))
            .map(|t| bool::from(t.as_bytes().ct_eq(token.as_bytes())))
            .unwrap_or(false)
    }

    pub fn janitor_running(&self) -> bool {
        self.inner.janitor.is_running()
    }

    /// Stop the retention janitor. Idempotent and safe to call concurrently;
    /// does not wait for the task to exit.
    pub fn shutdown(&self) {
        self.inner.janitor.stop();
    }

    /// `shutdown`, then wait until the janitor task has exited.
    pub async fn shutdown_and_wait(&self) {
        self.inner.janitor.stop();
        self.inner.janitor.wait().await;
    }
}
