//! Named monotonic counters.
//!
//! Values live in `AtomicU64` cells inside a sharded `DashMap`, so updates to
//! different names only meet on the shard lock for the initial insert. Once a
//! cell exists, increments go through the read guard and `fetch_add`.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct CounterStore {
    map: DashMap<String, AtomicU64>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self { map: DashMap::new() }
    }

    /// Increment by 1.
    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Increment by an arbitrary value. Saturates at `u64::MAX`.
    pub fn increment_by(&self, name: &str, delta: u64) {
        // Fast path: existing counter, shared shard guard only.
        if let Some(cell) = self.map.get(name) {
            add_saturating(cell.value(), delta);
            return;
        }
        let cell = self
            .map
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0));
        add_saturating(cell.value(), delta);
    }

    /// Current value, 0 for a counter that was never touched.
    pub fn get(&self, name: &str) -> u64 {
        self.map
            .get(name)
            .map(|c| c.value().load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// All counters sorted by name.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut out: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn add_saturating(cell: &AtomicU64, delta: u64) {
    if delta == 0 {
        return;
    }
    let mut cur = cell.load(Ordering::Relaxed);
    loop {
        let next = cur.saturating_add(delta);
        match cell.compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return,
            Err(actual) => cur = actual,
        }
    }
}
