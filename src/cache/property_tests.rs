//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify store invariants over generated operation
//! sequences.

use proptest::prelude::*;
use std::time::Duration;

use crate::cache::entry::epoch_millis;
use crate::cache::{CacheKey, CacheStore, ExpirationPolicy};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 8;

// == Strategies ==
/// Generates primary keys from a small alphabet so operations collide.
fn key_strategy() -> impl Strategy<Value = CacheKey> {
    "[a-d][a-z]{0,6}".prop_map(CacheKey::new)
}

/// Generates an optional secondary key.
fn secondary_strategy() -> impl Strategy<Value = Option<CacheKey>> {
    proptest::option::of("page=[0-9]".prop_map(CacheKey::new))
}

/// One store operation.
#[derive(Debug, Clone)]
enum CacheOp {
    Set {
        key: CacheKey,
        secondary: Option<CacheKey>,
        value: u32,
    },
    Get {
        key: CacheKey,
        secondary: Option<CacheKey>,
    },
    Remove {
        key: CacheKey,
    },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), secondary_strategy(), any::<u32>()).prop_map(
            |(key, secondary, value)| CacheOp::Set {
                key,
                secondary,
                value
            }
        ),
        (key_strategy(), secondary_strategy())
            .prop_map(|(key, secondary)| CacheOp::Get { key, secondary }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The bound holds after every operation: the store never tracks more
    // primary slots than it is configured for.
    #[test]
    fn prop_bound_is_never_exceeded(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        for op in ops {
            match op {
                CacheOp::Set { key, secondary, value } => {
                    store.set(key, secondary, ExpirationPolicy::standard(), value);
                }
                CacheOp::Get { key, secondary } => {
                    let _ = store.get::<u32>(&key, secondary.as_ref());
                }
                CacheOp::Remove { key } => {
                    let _ = store.remove(&key);
                }
            }
            prop_assert!(store.len() <= TEST_MAX_ENTRIES, "slot count exceeded bound");
        }
    }

    // Statistics track reads exactly: every get is either a hit or a miss,
    // and the reported slot count matches the store.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, secondary, value } => {
                    store.set(key, secondary, ExpirationPolicy::standard(), value);
                }
                CacheOp::Get { key, secondary } => {
                    match store.get::<u32>(&key, secondary.as_ref()).unwrap() {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Remove { key } => {
                    let _ = store.remove(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "slot count mismatch");
    }

    // A freshly stored value reads back unchanged.
    #[test]
    fn prop_roundtrip_storage(
        key in key_strategy(),
        secondary in secondary_strategy(),
        value in any::<u32>(),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(key.clone(), secondary.clone(), ExpirationPolicy::standard(), value);

        let retrieved = store.get::<u32>(&key, secondary.as_ref()).unwrap();
        prop_assert_eq!(retrieved.map(|v| *v), Some(value), "round-trip value mismatch");
    }

    // Distinct secondary keys under one primary never clobber each other.
    #[test]
    fn prop_secondary_isolation(
        key in key_strategy(),
        first in any::<u32>(),
        second in any::<u32>(),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let s1 = CacheKey::new("page=1");
        let s2 = CacheKey::new("page=2");

        store.set(key.clone(), Some(s1.clone()), ExpirationPolicy::standard(), first);
        store.set(key.clone(), Some(s2.clone()), ExpirationPolicy::standard(), second);

        prop_assert_eq!(
            store.get::<u32>(&key, Some(&s1)).unwrap().map(|v| *v),
            Some(first)
        );
        prop_assert_eq!(
            store.get::<u32>(&key, Some(&s2)).unwrap().map(|v| *v),
            Some(second)
        );
    }

    // Removing a primary slot hides every variant stored under it.
    #[test]
    fn prop_remove_drops_all_variants(
        key in key_strategy(),
        secondary in secondary_strategy(),
        value in any::<u32>(),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(key.clone(), secondary.clone(), ExpirationPolicy::standard(), value);
        store.remove(&key);

        prop_assert!(store.get::<u32>(&key, secondary.as_ref()).unwrap().is_none());
        prop_assert!(store.is_empty());
    }

    // Overwriting a slot replaces the value.
    #[test]
    fn prop_overwrite_replaces_value(
        key in key_strategy(),
        first in any::<u32>(),
        second in any::<u32>(),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(key.clone(), None, ExpirationPolicy::standard(), first);
        store.set(key.clone(), None, ExpirationPolicy::standard(), second);

        prop_assert_eq!(store.get::<u32>(&key, None).unwrap().map(|v| *v), Some(second));
        prop_assert_eq!(store.len(), 1);
    }

    // A value stored longer ago than its timeout is always a miss.
    #[test]
    fn prop_stale_entries_never_resurface(
        key in key_strategy(),
        value in any::<u32>(),
        age_secs in 2u64..3_600,
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let policy = ExpirationPolicy::after(Duration::from_secs(1));
        let stored_at = epoch_millis().saturating_sub(age_secs * 1_000);

        store.set_at(key.clone(), None, policy, value, stored_at);

        prop_assert!(store.get::<u32>(&key, None).unwrap().is_none());
    }
}
