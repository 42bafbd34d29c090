//! Error handling and run statistics.
//!
//! This module provides:
//! - Error type definitions for the API transport and initialization
//! - Retry strategy configuration and retriability rules
//! - Run statistics tracking (atomic error counters)
//!
//! Policy classification and planning never produce errors: malformed
//! record content degrades to a defined policy state instead. Everything
//! here concerns the transport and orchestration layers.

mod retry;
mod stats;
mod types;

// Re-export public API
pub use retry::{get_retry_strategy, is_retriable_error};
pub use stats::AuditStats;
pub use types::{ApiError, ErrorType, InitializationError};
