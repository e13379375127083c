//! Cache Entry Module
//!
//! Internal wrapper for a single cached value and its expiry metadata.

use std::any::Any;
use std::sync::Arc;

use crate::cache::ExpirationPolicy;
use crate::error::CacheError;

// == Cache Entry ==
/// One stored value together with when it was stored and how it expires.
///
/// Values are type-erased so the store can hold results of different
/// interactor calls side by side. Each slot must be read back with the same
/// type it was written with; a mismatched read fails loudly rather than
/// masquerading as a miss.
#[derive(Clone)]
pub struct CacheEntry {
    /// The stored value
    value: Arc<dyn Any + Send + Sync>,
    /// Storage timestamp (Unix milliseconds)
    stored_at_ms: u64,
    /// Policy deciding when the value goes stale
    policy: ExpirationPolicy,
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("stored_at_ms", &self.stored_at_ms)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored now.
    pub fn new<T: Send + Sync + 'static>(value: T, policy: ExpirationPolicy) -> Self {
        Self::stored_at(value, policy, epoch_millis())
    }

    /// Creates an entry with an explicit storage timestamp.
    pub fn stored_at<T: Send + Sync + 'static>(
        value: T,
        policy: ExpirationPolicy,
        stored_at_ms: u64,
    ) -> Self {
        Self {
            value: Arc::new(value),
            stored_at_ms,
            policy,
        }
    }

    // == Is Expired ==
    /// Evaluates the entry's policy against the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(epoch_millis())
    }

    /// Evaluates the entry's policy against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.policy.is_expired(self.stored_at_ms, now_ms)
    }

    // == Typed Access ==
    /// Returns the stored value as `T`.
    ///
    /// Fails with [`CacheError::TypeMismatch`] if the slot was written with
    /// a different type.
    pub fn value<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, CacheError> {
        Arc::clone(&self.value)
            .downcast::<T>()
            .map_err(|_| CacheError::TypeMismatch {
                expected: std::any::type_name::<T>(),
            })
    }

    // == Accessors ==
    /// Storage timestamp in Unix milliseconds.
    pub fn stored_at_ms(&self) -> u64 {
        self.stored_at_ms
    }

    /// The entry's expiration policy.
    pub fn policy(&self) -> ExpirationPolicy {
        self.policy
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in milliseconds.
pub fn epoch_millis() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_entry_never_expires() {
        let entry = CacheEntry::new(vec![1, 2, 3], ExpirationPolicy::Never);
        assert!(!entry.is_expired());
        assert!(!entry.is_expired_at(u64::MAX));
    }

    #[test]
    fn test_entry_fresh_within_timeout() {
        let entry = CacheEntry::new("value".to_string(), ExpirationPolicy::standard());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expired_after_timeout() {
        let policy = ExpirationPolicy::after(Duration::from_secs(1));
        let entry = CacheEntry::stored_at("value".to_string(), policy, 1_000);
        assert!(!entry.is_expired_at(1_999));
        assert!(entry.is_expired_at(2_000));
    }

    #[test]
    fn test_entry_typed_read_back() {
        let entry = CacheEntry::new(42u32, ExpirationPolicy::standard());
        let value = entry.value::<u32>().unwrap();
        assert_eq!(*value, 42);
    }

    #[test]
    fn test_entry_type_mismatch_fails_loudly() {
        let entry = CacheEntry::new(42u32, ExpirationPolicy::standard());
        let result = entry.value::<String>();
        assert!(matches!(result, Err(CacheError::TypeMismatch { .. })));
    }

    #[test]
    fn test_entry_stored_at_is_recent() {
        let before = epoch_millis();
        let entry = CacheEntry::new((), ExpirationPolicy::standard());
        let after = epoch_millis();
        assert!(entry.stored_at_ms() >= before);
        assert!(entry.stored_at_ms() <= after);
    }
}
