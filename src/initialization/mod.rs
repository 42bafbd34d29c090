//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - HTTP client (authenticated, with timeouts)
//! - Concurrency semaphore
//! - Token-bucket rate limiter
//! - Logger
//!
//! All initialization functions return proper error types for error
//! handling.

mod client;
mod logger;
mod rate_limiter;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use rate_limiter::{init_rate_limiter, RateLimiter};

/// Initializes a semaphore for controlling concurrency.
///
/// The semaphore caps the number of zone audits in flight at once; the cap
/// exists for the remote API's benefit, not the local machine's.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
