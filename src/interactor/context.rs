//! Interactor Context Module
//!
//! The single choke point every outbound data fetch passes through:
//! cache-or-fetch, request coalescing, retry with backoff, and translation
//! of failures into the closed error taxonomy.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::interactor::flight::{Flight, FlightRegistry};
use crate::interactor::{CacheOptions, RetryPolicy};

// == Interactor Context ==
/// Shared execution context for all interactors.
///
/// Owns the one long-lived cache store for the session. Build it once at
/// session start, clone it into every interactor (clones share the same
/// store and flight registry), and [`clear`](Self::clear) it on logout.
#[derive(Clone)]
pub struct InteractorContext {
    /// Cache shared by every interactor
    cache: Arc<RwLock<CacheStore>>,
    /// Fetches currently in flight, for coalescing
    flights: Arc<FlightRegistry>,
}

impl InteractorContext {
    // == Constructors ==
    /// Creates a context sized from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_store(CacheStore::new(config.max_entries))
    }

    /// Creates a context around an existing store.
    pub fn with_store(store: CacheStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(store)),
            flights: Arc::new(FlightRegistry::default()),
        }
    }

    // == Execute ==
    /// Runs a data fetch with cache-or-fetch semantics.
    ///
    /// With `cache_option` set and `force_refresh` off, a live cached value
    /// short-circuits the call and `fetch` never runs. On a miss, concurrent
    /// callers of the same slot are coalesced: one fetches, the rest wait
    /// and re-read the cache. The fetch itself is retried per `retry`; once
    /// attempts are exhausted the failure is translated into [`ApiError`]
    /// and surfaced. Failures never populate the cache.
    ///
    /// A successful result is stored under the slot iff
    /// `cache_option.allow_overwrite`.
    ///
    /// Dropping the returned future cancels the call: any pending backoff
    /// delay or in-flight fetch is abandoned, the coalescing slot is
    /// released, and waiting callers are woken. Cancellation never turns
    /// into a taxonomy error.
    pub async fn execute<T, F, Fut>(
        &self,
        cache_option: Option<CacheOptions>,
        force_refresh: bool,
        retry: RetryPolicy,
        fetch: F,
    ) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let Some(options) = cache_option else {
            return self.attempt_loop(None, &retry, &fetch).await;
        };

        if force_refresh {
            // A forced refresh always fetches: it neither reads the cache
            // nor attaches to a fetch already in flight.
            return self.attempt_loop(Some(&options), &retry, &fetch).await;
        }

        loop {
            if let Some(hit) = self.lookup::<T>(&options).await? {
                return Ok(hit);
            }

            match self
                .flights
                .join((options.key.clone(), options.secondary_key.clone()))
            {
                Flight::Leader(_guard) => {
                    // A previous leader may have filled the slot between our
                    // miss and winning the flight.
                    if let Some(hit) = self.lookup::<T>(&options).await? {
                        return Ok(hit);
                    }
                    return self.attempt_loop(Some(&options), &retry, &fetch).await;
                }
                Flight::Follower(mut rx) => {
                    debug!(key = %options.key, "waiting on fetch already in flight");
                    let _ = rx.recv().await;
                    // Leader finished or was cancelled; go around and re-read
                    // the cache. If it left nothing behind, we contend to
                    // lead the next flight.
                }
            }
        }
    }

    // == Invalidate ==
    /// Evicts a primary slot so the next read fetches fresh data. Used after
    /// mutations (e.g. an avatar update invalidates the cached profile).
    pub async fn invalidate(&self, key: &CacheKey) {
        self.cache.write().await.remove(key);
    }

    /// Evicts a single `(key, secondary)` entry.
    pub async fn invalidate_secondary(&self, key: &CacheKey, secondary: Option<&CacheKey>) {
        self.cache.write().await.remove_secondary(key, secondary);
    }

    // == Clear ==
    /// Empties the cache. Call on logout / session reset.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }

    // == Stats ==
    /// Snapshot of the cache effectiveness counters.
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Reads the slot, cloning a live hit out of the store.
    async fn lookup<T>(&self, options: &CacheOptions) -> Result<Option<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        // Write lock: a read touches recency order and counters.
        let mut cache = self.cache.write().await;
        let value = cache.get::<T>(&options.key, options.secondary_key.as_ref())?;
        if value.is_some() {
            debug!(key = %options.key, "cache hit");
        }
        Ok(value.map(|arc| (*arc).clone()))
    }

    /// Fetches with retries; stores the result when the slot allows it.
    async fn attempt_loop<T, F, Fut>(
        &self,
        options: Option<&CacheOptions>,
        retry: &RetryPolicy,
        fetch: &F,
    ) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                tokio::time::sleep(retry.delay_before(attempt)).await;
            }

            match fetch().await {
                Ok(value) => {
                    if let Some(options) = options {
                        if options.allow_overwrite {
                            self.cache.write().await.set(
                                options.key.clone(),
                                options.secondary_key.clone(),
                                options.expiration_policy,
                                value.clone(),
                            );
                        }
                    }
                    return Ok(value);
                }
                Err(err) if attempt < retry.retry_count => {
                    attempt += 1;
                    warn!(
                        error = %err,
                        attempt,
                        max_retries = retry.retry_count,
                        "fetch failed, retrying"
                    );
                }
                Err(err) => return Err(ApiError::from_fetch(err)),
            }
        }
    }
}
