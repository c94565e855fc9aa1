//! Daily unique users: UTC date -> deduplicated set of user ids.

use chrono::{Days, NaiveDate, Utc};
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

/// Date key format used in labels and lookups (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Anything that can drop per-day data older than a retention window.
///
/// The janitor only talks to this trait, so a persistent backend can report
/// failures through the `Result`.
pub trait RetentionTarget: Send + Sync {
    /// Remove data strictly older than `retention_days` before `today`.
    /// Returns the number of removed date buckets.
    fn cleanup(&self, retention_days: u32, today: NaiveDate) -> Result<usize>;
}

#[derive(Default)]
struct UserSet {
    users: DashSet<String>,
    count: AtomicU64,
}

impl UserSet {
    fn insert(&self, user_id: &str) {
        // DashSet::insert is the atomic check-and-insert; only the winner counts.
        if self.users.insert(user_id.to_string()) {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct DailyUserTracker {
    days: DashMap<NaiveDate, UserSet>,
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

impl DailyUserTracker {
    pub fn new() -> Self {
        Self { days: DashMap::new() }
    }

    /// Record `user_id` for the current UTC date. Empty ids are ignored.
    pub fn track_user(&self, user_id: &str) {
        self.track_user_on(today_utc(), user_id);
    }

    /// Record `user_id` for an explicit date.
    pub fn track_user_on(&self, date: NaiveDate, user_id: &str) {
        if user_id.is_empty() {
            return;
        }
        if let Some(set) = self.days.get(&date) {
            set.insert(user_id);
            return;
        }
        self.days
            .entry(date)
            .or_insert_with(UserSet::default)
            .insert(user_id);
    }

    /// Distinct users for a `YYYY-MM-DD` key; 0 for unknown or malformed keys.
    pub fn count_for_date(&self, date_key: &str) -> u64 {
        match NaiveDate::parse_from_str(date_key, DATE_FORMAT) {
            Ok(date) => self.count_for(date),
            Err(_) => 0,
        }
    }

    pub fn count_for(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).map(|s| s.count()).unwrap_or(0)
    }

    pub fn today_count(&self) -> u64 {
        self.count_for(today_utc())
    }

    /// Dates that currently hold a bucket, oldest first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut out: Vec<NaiveDate> = self.days.iter().map(|r| *r.key()).collect();
        out.sort();
        out
    }

    /// Drop buckets strictly older than `retention_days` before today (UTC).
    pub fn cleanup_old_data(&self, retention_days: u32) -> Result<usize> {
        self.cleanup_old_data_at(retention_days, today_utc())
    }

    /// Drop buckets whose date is before `today - retention_days`.
    ///
    /// A bucket exactly `retention_days` old is kept.
    pub fn cleanup_old_data_at(&self, retention_days: u32, today: NaiveDate) -> Result<usize> {
        let Some(cutoff) = today.checked_sub_days(Days::new(u64::from(retention_days))) else {
            return Ok(0);
        };

        let mut removed = 0usize;
        self.days.retain(|date, _| {
            let keep = *date >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });

        tracing::debug!(removed, %cutoff, "daily user buckets cleaned");
        Ok(removed)
    }
}

impl RetentionTarget for DailyUserTracker {
    fn cleanup(&self, retention_days: u32, today: NaiveDate) -> Result<usize> {
        self.cleanup_old_data_at(retention_days, today)
    }
}
