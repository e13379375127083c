//! Configuration Module
//!
//! Sizing and expiry defaults for the shared cache, loadable from the
//! environment.

use std::env;
use std::time::Duration;

use crate::cache::ExpirationPolicy;

/// Data-layer configuration.
///
/// All values can be set via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of primary key slots the cache can hold
    pub max_entries: usize,
    /// Standard expiry for cached query results, in seconds
    pub default_ttl_secs: u64,
    /// Expiry for volatile data such as search results, in seconds
    pub short_ttl_secs: u64,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `BASSHEAD_MAX_CACHE_ENTRIES` - Maximum primary slots (default: 256)
    /// - `BASSHEAD_DEFAULT_TTL` - Standard expiry in seconds (default: 900)
    /// - `BASSHEAD_SHORT_TTL` - Volatile-data expiry in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("BASSHEAD_MAX_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            default_ttl_secs: env::var("BASSHEAD_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            short_ttl_secs: env::var("BASSHEAD_SHORT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }

    // == Policy Helpers ==
    /// The configured standard expiration policy.
    pub fn default_policy(&self) -> ExpirationPolicy {
        ExpirationPolicy::after(Duration::from_secs(self.default_ttl_secs))
    }

    /// The configured volatile-data expiration policy.
    pub fn short_policy(&self) -> ExpirationPolicy {
        ExpirationPolicy::after(Duration::from_secs(self.short_ttl_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 256,
            default_ttl_secs: 900,
            short_ttl_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 256);
        assert_eq!(config.default_ttl_secs, 900);
        assert_eq!(config.short_ttl_secs, 300);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("BASSHEAD_MAX_CACHE_ENTRIES");
        env::remove_var("BASSHEAD_DEFAULT_TTL");
        env::remove_var("BASSHEAD_SHORT_TTL");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 256);
        assert_eq!(config.default_ttl_secs, 900);
        assert_eq!(config.short_ttl_secs, 300);
    }

    #[test]
    fn test_config_policies_match_ttls() {
        let config = Config::default();
        assert_eq!(config.default_policy(), ExpirationPolicy::standard());
        assert_eq!(config.short_policy(), ExpirationPolicy::short());
    }
}
