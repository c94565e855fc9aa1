//! Weekly cleanup schedule.
//!
//! Kept free of timers so the janitor's cadence can be tested as a plain
//! function of "now".

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};

/// Next `weekday` at `hour:00:00` UTC strictly after `now`.
///
/// - target weekday, before `hour`: later the same day
/// - target weekday, at or after `hour`: 7 days later
/// - any other day: next calendar occurrence (1..=6 days ahead)
///
/// Hours above 23 are clamped to 23.
pub fn next_cleanup_time(now: DateTime<Utc>, weekday: Weekday, hour: u32) -> DateTime<Utc> {
    let today = now.date_naive();
    let target = weekday.num_days_from_monday();
    let current = today.weekday().num_days_from_monday();
    let days_ahead = (7 + target - current) % 7;

    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let day = today + Duration::days(i64::from(days_ahead));
    let candidate = Utc.from_utc_datetime(&day.and_time(at));

    if candidate <= now {
        candidate + Duration::days(7)
    } else {
        candidate
    }
}

/// Source of "now" for schedulers.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
