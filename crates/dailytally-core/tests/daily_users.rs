//! DailyUserTracker behavior.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use chrono::{Days, NaiveDate, Utc};
use dailytally_core::{DailyUserTracker, RetentionTarget, DATE_FORMAT};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

#[test]
fn empty_user_id_is_ignored() {
    let t = DailyUserTracker::new();
    t.track_user("");
    assert_eq!(t.today_count(), 0);
    assert!(t.dates().is_empty());
}

#[test]
fn same_user_counts_once() {
    let t = DailyUserTracker::new();
    t.track_user("user1");
    t.track_user("user1");
    t.track_user("user1");
    assert_eq!(t.today_count(), 1);

    t.track_user("user2");
    t.track_user("user3");
    assert_eq!(t.today_count(), 3);
}

#[test]
fn count_for_unknown_or_malformed_date_is_zero() {
    let t = DailyUserTracker::new();
    assert_eq!(t.count_for_date("2023-01-01"), 0);
    t.track_user_on(date("2023-01-01"), "u");
    assert_eq!(t.count_for_date("2023-01-01"), 1);
    assert_eq!(t.count_for_date("not-a-date"), 0);
    assert_eq!(t.count_for_date(""), 0);
}

#[test]
fn count_for_today_key() {
    let t = DailyUserTracker::new();
    t.track_user("user1");
    t.track_user("user2");
    let today = Utc::now().date_naive().format(DATE_FORMAT).to_string();
    assert_eq!(t.count_for_date(&today), 2);
}

#[test]
fn dates_are_independent() {
    let t = DailyUserTracker::new();
    t.track_user_on(date("2025-06-01"), "a");
    t.track_user_on(date("2025-06-02"), "a");
    t.track_user_on(date("2025-06-02"), "b");
    assert_eq!(t.count_for(date("2025-06-01")), 1);
    assert_eq!(t.count_for(date("2025-06-02")), 2);
    assert_eq!(t.dates(), vec![date("2025-06-01"), date("2025-06-02")]);
}

#[test]
fn cleanup_removes_old_and_keeps_today() {
    let t = DailyUserTracker::new();
    let today = Utc::now().date_naive();
    let old = today.checked_sub_days(Days::new(10)).unwrap();
    t.track_user_on(old, "user1");
    t.track_user("user2");
    assert_eq!(t.count_for(old), 1);

    let removed = t.cleanup_old_data(5).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(t.count_for(old), 0);
    assert_eq!(t.today_count(), 1);
}

#[test]
fn cleanup_boundary_keeps_exactly_retention_days_old() {
    let t = DailyUserTracker::new();
    let today = date("2025-06-14");
    t.track_user_on(date("2025-06-09"), "five_days_old");
    t.track_user_on(date("2025-06-08"), "six_days_old");

    let removed = t.cleanup_old_data_at(5, today).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(t.count_for(date("2025-06-09")), 1);
    assert_eq!(t.count_for(date("2025-06-08")), 0);
}

#[test]
fn cleanup_crosses_month_boundaries_by_calendar() {
    let t = DailyUserTracker::new();
    t.track_user_on(date("2025-02-28"), "a");
    t.track_user_on(date("2025-02-27"), "b");
    // 2025-03-02 minus 2 days is 2025-02-28
    t.cleanup_old_data_at(2, date("2025-03-02")).unwrap();
    assert_eq!(t.dates(), vec![date("2025-02-28")]);
}

#[test]
fn cleanup_with_zero_retention_keeps_only_today() {
    let t = DailyUserTracker::new();
    let today = date("2025-06-14");
    t.track_user_on(today, "a");
    t.track_user_on(date("2025-06-13"), "b");
    t.cleanup_old_data_at(0, today).unwrap();
    assert_eq!(t.dates(), vec![today]);
}

#[test]
fn cleanup_with_huge_retention_removes_nothing() {
    let t = DailyUserTracker::new();
    t.track_user_on(date("1970-01-01"), "a");
    assert_eq!(t.cleanup_old_data_at(u32::MAX, date("2025-06-14")).unwrap(), 0);
    assert_eq!(t.dates().len(), 1);
}

#[test]
fn retention_target_delegates_to_cleanup() {
    let t = DailyUserTracker::new();
    t.track_user_on(date("2025-01-01"), "a");
    let target: &dyn RetentionTarget = &t;
    assert_eq!(target.cleanup(30, date("2025-06-14")).unwrap(), 1);
    assert!(t.dates().is_empty());
}

#[test]
fn concurrent_disjoint_users_are_exact() {
    let t = Arc::new(DailyUserTracker::new());
    let handles: Vec<_> = (0..50)
        .map(|g| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for j in 0..20 {
                    t.track_user(&format!("user_{g}_{j}"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(t.today_count(), 1000);
}

#[test]
fn concurrent_identical_users_count_once() {
    let t = Arc::new(DailyUserTracker::new());
    let day = date("2025-06-14");
    let handles: Vec<_> = (0..32)
        .map(|_| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for j in 0..50 {
                    t.track_user_on(day, &format!("shared_{j}"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(t.count_for(day), 50);
}
