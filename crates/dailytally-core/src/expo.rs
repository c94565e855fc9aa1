//! Prometheus text exposition rendering.
//!
//! Every line carries a `service` label; extra labels are merged with it and
//! emitted in key order so identical state renders to identical bytes.

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::fmt::{Display, Write};

use crate::counter::CounterStore;
use crate::daily::{today_utc, DailyUserTracker, DATE_FORMAT};

/// Canonical content type for the text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Metric family for per-day distinct users.
pub const DAILY_UNIQUE_USERS: &str = "daily_unique_users_total";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Exposition name for a counter: sanitized, then suffixed with `_total`.
///
/// Returns `None` for an empty name and for names that would land on the
/// reserved [`DAILY_UNIQUE_USERS`] family.
pub fn counter_metric_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let mut out: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out.push_str("_total");
    if out == DAILY_UNIQUE_USERS {
        return None;
    }
    Some(out)
}

/// Counter families keyed by exposition name. Raw names that sanitize to the
/// same family are summed into one series.
fn counter_families(counters: &CounterStore) -> BTreeMap<String, u64> {
    let mut families: BTreeMap<String, u64> = BTreeMap::new();
    for (name, value) in counters.snapshot() {
        let Some(metric) = counter_metric_name(&name) else {
            continue;
        };
        let slot = families.entry(metric).or_insert(0);
        *slot = slot.saturating_add(value);
    }
    families
}

#[derive(Debug, Clone)]
pub struct Exporter {
    service: String,
    historical_days: u32,
}

impl Exporter {
    pub fn new(service: impl Into<String>, historical_days: u32) -> Self {
        Self {
            service: service.into(),
            historical_days,
        }
    }

    /// Write one sample line: `name{k="v",...} value`.
    ///
    /// The configured service label overrides a caller-supplied `service`.
    pub fn format_metric<V: Display>(
        &self,
        out: &mut String,
        name: &str,
        labels: &[(&str, &str)],
        value: V,
    ) {
        let mut merged: BTreeMap<&str, &str> = labels.iter().copied().collect();
        merged.insert("service", self.service.as_str());

        let label_str = merged
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(out, "{}{{{}}} {}", name, label_str, value);
    }

    /// Render counters and daily users using the current UTC date.
    pub fn render(&self, counters: &CounterStore, daily: &DailyUserTracker) -> String {
        self.render_at(counters, daily, today_utc())
    }

    /// Render with an explicit "today".
    pub fn render_at(
        &self,
        counters: &CounterStore,
        daily: &DailyUserTracker,
        today: NaiveDate,
    ) -> String {
        let mut out = String::new();

        for (metric, value) in counter_families(counters) {
            let _ = writeln!(out, "# TYPE {} counter", metric);
            self.format_metric(&mut out, &metric, &[], value);
        }

        let _ = writeln!(out, "# TYPE {} counter", DAILY_UNIQUE_USERS);
        let today_key = today.format(DATE_FORMAT).to_string();
        self.format_metric(
            &mut out,
            DAILY_UNIQUE_USERS,
            &[("date", today_key.as_str())],
            daily.count_for(today),
        );

        // Prior days, newest first; days without a bucket are skipped.
        for back in 1..=u64::from(self.historical_days) {
            let Some(date) = today.checked_sub_days(Days::new(back)) else {
                break;
            };
            let count = daily.count_for(date);
            if count == 0 {
                continue;
            }
            let key = date.format(DATE_FORMAT).to_string();
            self.format_metric(&mut out, DAILY_UNIQUE_USERS, &[("date", key.as_str())], count);
        }

        out
    }
}
