//! Cache Store Module
//!
//! Bounded two-level key-value store with read-time expiration and LRU
//! eviction at primary-key granularity.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::entry::epoch_millis;
use crate::cache::{CacheEntry, CacheKey, CacheStats, ExpirationPolicy, LruTracker};
use crate::error::CacheError;

// == Bucket ==
/// All entries stored under one primary key, indexed by secondary key.
///
/// `None` is the slot for calls without a secondary key; each distinct
/// secondary key (pagination cursor, filter variant) gets its own slot.
pub type CacheBucket = HashMap<Option<CacheKey>, CacheEntry>;

// == Cache Store ==
/// Main cache storage.
///
/// Entries are addressed by `(primary, secondary | none)`. The bound and
/// the eviction both apply to primary slots: when an insert pushes the slot
/// count strictly above `max_entries`, the least recently used primary slot
/// is dropped wholesale, secondary entries included.
///
/// Expiration is evaluated lazily when an entry is read; an expired entry is
/// treated as a miss and dropped, never returned.
#[derive(Debug)]
pub struct CacheStore {
    /// Primary key slots
    buckets: HashMap<CacheKey, CacheBucket>,
    /// Recency tracker over primary keys
    lru: LruTracker,
    /// Effectiveness counters
    stats: CacheStats,
    /// Maximum number of primary slots
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store bounded to `max_entries` primary slots.
    pub fn new(max_entries: usize) -> Self {
        Self {
            buckets: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores a value under `(key, secondary)`, replacing any previous entry
    /// in that slot and marking the primary key as most recently used.
    pub fn set<T: Send + Sync + 'static>(
        &mut self,
        key: CacheKey,
        secondary: Option<CacheKey>,
        policy: ExpirationPolicy,
        value: T,
    ) {
        self.set_at(key, secondary, policy, value, epoch_millis());
    }

    /// Same as [`set`](Self::set) with an explicit storage timestamp.
    pub fn set_at<T: Send + Sync + 'static>(
        &mut self,
        key: CacheKey,
        secondary: Option<CacheKey>,
        policy: ExpirationPolicy,
        value: T,
        stored_at_ms: u64,
    ) {
        let entry = CacheEntry::stored_at(value, policy, stored_at_ms);
        self.buckets.entry(key.clone()).or_default().insert(secondary, entry);
        self.lru.touch(&key);

        // Evict only once the insert has pushed the slot count over the
        // bound, and always a whole primary bucket at a time.
        if self.buckets.len() > self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.buckets.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used cache slot");
            }
        }

        self.stats.set_total_entries(self.buckets.len());
    }

    // == Get ==
    /// Returns the live value stored under `(key, secondary)`, if any.
    ///
    /// An absent or expired slot is a miss (`Ok(None)`); the expired entry
    /// is dropped on the way out. A live hit marks the primary key as most
    /// recently used. A slot written with a different type than `T` fails
    /// with [`CacheError::TypeMismatch`].
    pub fn get<T: Send + Sync + 'static>(
        &mut self,
        key: &CacheKey,
        secondary: Option<&CacheKey>,
    ) -> Result<Option<Arc<T>>, CacheError> {
        let slot = secondary.cloned();

        let Some(bucket) = self.buckets.get(key) else {
            self.stats.record_miss();
            return Ok(None);
        };
        let Some(entry) = bucket.get(&slot) else {
            self.stats.record_miss();
            return Ok(None);
        };

        if entry.is_expired() {
            self.drop_slot(key, &slot);
            self.stats.record_miss();
            debug!(key = %key, "cache entry expired on read");
            return Ok(None);
        }

        let value = entry.value::<T>()?;
        self.stats.record_hit();
        self.lru.touch(key);
        Ok(Some(value))
    }

    // == Remove ==
    /// Drops the whole primary slot, returning what was removed.
    pub fn remove(&mut self, key: &CacheKey) -> Option<CacheBucket> {
        let removed = self.buckets.remove(key);
        if removed.is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.buckets.len());
        }
        removed
    }

    /// Drops a single `(key, secondary)` entry. Returns whether one existed.
    ///
    /// The primary slot itself goes away with its last entry.
    pub fn remove_secondary(&mut self, key: &CacheKey, secondary: Option<&CacheKey>) -> bool {
        let removed = self.drop_slot(key, &secondary.cloned());
        self.stats.set_total_entries(self.buckets.len());
        removed
    }

    // == Clear ==
    /// Empties the store. Used on logout / session reset.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.lru = LruTracker::new();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns a snapshot of the effectiveness counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.buckets.len());
        stats
    }

    // == Length ==
    /// Current number of primary slots.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    // == Is Empty ==
    /// Whether the store holds no slots.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Removes one secondary entry, dropping the bucket when it empties.
    fn drop_slot(&mut self, key: &CacheKey, slot: &Option<CacheKey>) -> bool {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        let removed = bucket.remove(slot).is_some();
        if bucket.is_empty() {
            self.buckets.remove(key);
            self.lru.remove(key);
        }
        removed
    }
}
