//! Basshead data-layer core
//!
//! Caching, retry, and request-coalescing for the interactors that talk to
//! the Basshead backend. Every outbound fetch runs through
//! [`InteractorContext::execute`], which consults a shared expiring cache,
//! coalesces duplicate in-flight requests, retries failures with backoff,
//! and surfaces errors as the closed [`ApiError`] taxonomy.

pub mod cache;
pub mod config;
pub mod error;
pub mod interactor;

pub use cache::{CacheKey, CacheStats, CacheStore, ExpirationPolicy};
pub use config::Config;
pub use error::{ApiError, CacheError, Result};
pub use interactor::{CacheOptions, InteractorContext, RetryPolicy};
