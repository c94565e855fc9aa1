//! Weekly cleanup schedule.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use dailytally_core::next_cleanup_time;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn monday_waits_until_saturday() {
    // 2025-06-09 is a Monday
    let next = next_cleanup_time(at(2025, 6, 9, 10, 0), Weekday::Sat, 3);
    assert_eq!(next, at(2025, 6, 14, 3, 0));
    assert_eq!(next.weekday(), Weekday::Sat);
}

#[test]
fn saturday_before_hour_runs_same_day() {
    let next = next_cleanup_time(at(2025, 6, 14, 1, 0), Weekday::Sat, 3);
    assert_eq!(next, at(2025, 6, 14, 3, 0));
}

#[test]
fn saturday_after_hour_waits_a_week() {
    let next = next_cleanup_time(at(2025, 6, 14, 10, 0), Weekday::Sat, 3);
    assert_eq!(next, at(2025, 6, 21, 3, 0));
}

#[test]
fn exactly_at_hour_waits_a_week() {
    let next = next_cleanup_time(at(2025, 6, 14, 3, 0), Weekday::Sat, 3);
    assert_eq!(next, at(2025, 6, 21, 3, 0));
}

#[test]
fn sunday_waits_six_days() {
    let next = next_cleanup_time(at(2025, 6, 15, 0, 0), Weekday::Sat, 3);
    assert_eq!(next, at(2025, 6, 21, 3, 0));
}

#[test]
fn rescheduling_from_nominal_time_is_weekly() {
    let first = next_cleanup_time(at(2025, 6, 9, 10, 0), Weekday::Sat, 3);
    let second = next_cleanup_time(first, Weekday::Sat, 3);
    let third = next_cleanup_time(second, Weekday::Sat, 3);
    assert_eq!((second - first).num_days(), 7);
    assert_eq!((third - second).num_days(), 7);
    assert_eq!(third.hour(), 3);
}

#[test]
fn custom_weekday_and_hour() {
    // Wednesday target from Friday: 5 days ahead.
    let next = next_cleanup_time(at(2025, 6, 13, 12, 0), Weekday::Wed, 22);
    assert_eq!(next, at(2025, 6, 18, 22, 0));
}

#[test]
fn crosses_year_boundary() {
    // 2025-12-29 is a Monday
    let next = next_cleanup_time(at(2025, 12, 29, 8, 0), Weekday::Sat, 3);
    assert_eq!(next, at(2026, 1, 3, 3, 0));
}

#[test]
fn out_of_range_hour_is_clamped() {
    let next = next_cleanup_time(at(2025, 6, 9, 10, 0), Weekday::Sat, 99);
    assert_eq!(next, at(2025, 6, 14, 23, 0));
}
