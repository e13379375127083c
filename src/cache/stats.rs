//! Cache Statistics Module
//!
//! Counters for cache effectiveness: hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache effectiveness counters.
///
/// A miss is recorded both for absent slots and for entries that turned out
/// to be expired on read. `total_entries` counts primary key slots, which is
/// also the unit the store's bound applies to.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads that returned a live value
    pub hits: u64,
    /// Reads that found nothing usable (absent or expired)
    pub misses: u64,
    /// Primary slots dropped under LRU pressure
    pub evictions: u64,
    /// Current number of primary key slots
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any reads.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Slot Count ==
    /// Updates the primary slot count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
