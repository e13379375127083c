//! Expiration Policy Module
//!
//! Read-time staleness predicates for cached entries.

use std::time::Duration;

// == Expiration Policy ==
/// Decides whether a stored value is stale.
///
/// The policy is evaluated lazily when an entry is read; nothing sweeps the
/// store in the background. Expiry compares the entry's stored-at timestamp
/// plus the timeout against the current wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationPolicy {
    /// Entry never expires; only explicit removal or LRU pressure drops it.
    Never,
    /// Entry expires once the duration has elapsed since it was stored.
    After(Duration),
}

impl ExpirationPolicy {
    /// Standard timeout for most query results.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

    /// Timeout for volatile data such as search results.
    pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

    // == Constructors ==
    /// The standard 15 minute policy.
    pub fn standard() -> Self {
        Self::After(Self::DEFAULT_TIMEOUT)
    }

    /// The 5 minute policy for volatile data.
    pub fn short() -> Self {
        Self::After(Self::SHORT_TIMEOUT)
    }

    /// A policy with an explicit timeout.
    pub fn after(timeout: Duration) -> Self {
        Self::After(timeout)
    }

    // == Is Expired ==
    /// Evaluates the policy for an entry stored at `stored_at_ms`, as of
    /// `now_ms` (both Unix milliseconds).
    ///
    /// An entry is expired once the full timeout has elapsed, i.e. when
    /// `now >= stored_at + timeout`.
    pub fn is_expired(&self, stored_at_ms: u64, now_ms: u64) -> bool {
        match self {
            Self::Never => false,
            Self::After(timeout) => {
                let deadline = stored_at_ms.saturating_add(timeout.as_millis() as u64);
                now_ms >= deadline
            }
        }
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
