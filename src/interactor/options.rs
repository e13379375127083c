//! Interactor Options Module
//!
//! Per-call policies: how a fetch result is cached and how failures are
//! retried.

use std::time::Duration;

use crate::cache::{CacheKey, ExpirationPolicy};

// == Cache Options ==
/// Caching behavior for a single interactor call.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Primary slot for the result
    pub key: CacheKey,
    /// Variant slot under the primary key (pagination cursor, filter set)
    pub secondary_key: Option<CacheKey>,
    /// When the stored result goes stale
    pub expiration_policy: ExpirationPolicy,
    /// Whether a successful fetch may write its result into the slot
    pub allow_overwrite: bool,
}

impl CacheOptions {
    // == Constructor ==
    /// Options for a plain cached call: standard expiry, writable slot.
    pub fn new(key: impl Into<CacheKey>) -> Self {
        Self {
            key: key.into(),
            secondary_key: None,
            expiration_policy: ExpirationPolicy::default(),
            allow_overwrite: true,
        }
    }

    // == Builders ==
    /// Addresses a variant slot under the primary key.
    pub fn with_secondary_key(mut self, secondary: impl Into<CacheKey>) -> Self {
        self.secondary_key = Some(secondary.into());
        self
    }

    /// Overrides the expiration policy.
    pub fn with_policy(mut self, policy: ExpirationPolicy) -> Self {
        self.expiration_policy = policy;
        self
    }

    /// Reads the slot but never writes it back.
    pub fn read_only(mut self) -> Self {
        self.allow_overwrite = false;
        self
    }
}

// == Retry Policy ==
/// Retry behavior for a single interactor call.
///
/// `retry_count = 0` means attempt once, no retry. The delay before retry
/// attempt `n` (1-based) is `initial_delay_ms * delay_incremental_factor * n`
/// milliseconds, capped at `max_delay_ms` — each step grows linearly with
/// the attempt index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// How many times to retry after the first failure
    pub retry_count: u32,
    /// Base delay in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound on any single delay, in milliseconds
    pub max_delay_ms: u64,
    /// Multiplier applied per attempt index
    pub delay_incremental_factor: f64,
}

impl RetryPolicy {
    // == Constructors ==
    /// Attempt once, never retry.
    pub fn none() -> Self {
        Self::retries(0)
    }

    /// Retry up to `retry_count` times with the stock delays.
    pub fn retries(retry_count: u32) -> Self {
        Self {
            retry_count,
            initial_delay_ms: 200,
            max_delay_ms: 5_000,
            delay_incremental_factor: 1.5,
        }
    }

    // == Delay ==
    /// Delay to sleep before attempt `attempt` (0 = first try, no delay).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let ms = (self.initial_delay_ms as f64 * self.delay_incremental_factor * attempt as f64)
            as u64;
        Duration::from_millis(ms.min(self.max_delay_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
