//! In-Flight Fetch Registry
//!
//! Coalesces concurrent fetches for the same cache slot. The first caller
//! becomes the leader and actually fetches; everyone else waits for the
//! leader to finish and then re-reads the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::cache::CacheKey;

/// A fetch in flight is identified the same way its cache slot is.
pub(crate) type FlightKey = (CacheKey, Option<CacheKey>);

// == Flight Registry ==
/// Registry of fetches currently in flight.
///
/// Each slot holds a broadcast sender whose channel is closed when the
/// leader releases the slot. Closing is what wakes followers, so a leader
/// that is cancelled mid-fetch wakes them exactly like one that finished:
/// the guard drops, the sender drops, the channel closes.
#[derive(Default)]
pub(crate) struct FlightRegistry {
    inner: Mutex<HashMap<FlightKey, broadcast::Sender<()>>>,
}

// == Flight ==
/// The role a caller was assigned for a slot.
pub(crate) enum Flight {
    /// This caller fetches. The guard frees the slot on drop.
    Leader(FlightGuard),
    /// Another caller is already fetching this slot; await the receiver,
    /// then re-read the cache.
    Follower(broadcast::Receiver<()>),
}

impl FlightRegistry {
    // == Join ==
    /// Joins the flight for `key`, becoming leader if nobody holds it.
    pub fn join(self: &Arc<Self>, key: FlightKey) -> Flight {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = inner.get(&key) {
            return Flight::Follower(tx.subscribe());
        }
        let (tx, _rx) = broadcast::channel(1);
        inner.insert(key.clone(), tx);
        Flight::Leader(FlightGuard {
            registry: Arc::clone(self),
            key,
        })
    }

    /// Frees a slot and wakes its followers by dropping the sender.
    fn release(&self, key: &FlightKey) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.remove(key);
    }
}

// == Flight Guard ==
/// Releases the leader's slot when the fetch completes or is cancelled.
pub(crate) struct FlightGuard {
    registry: Arc<FlightRegistry>,
    key: FlightKey,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.registry.release(&self.key);
    }
}
