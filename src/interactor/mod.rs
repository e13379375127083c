//! Interactor Module
//!
//! Execution wrapper for data fetches: cache short-circuit, request
//! coalescing, retry with backoff, and uniform error translation.

mod context;
mod flight;
mod options;

// Re-export public types
pub use context::InteractorContext;
pub use options::{CacheOptions, RetryPolicy};
