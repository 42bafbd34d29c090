//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (API endpoints, timeouts, retry tuning)
//! - CLI option types and parsing
//! - The library-level `Config` threaded through every component

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
