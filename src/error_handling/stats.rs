//! Run statistics tracking.
//!
//! Thread-safe error counters shared across zone tasks. All categories are
//! initialized to zero so increments never allocate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::{ApiError, ErrorType};

/// Thread-safe audit statistics tracker.
///
/// Tracks error occurrences using atomic counters, allowing concurrent
/// access from multiple zone tasks via `Arc`.
pub struct AuditStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl AuditStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        AuditStats { errors }
    }

    /// Increments an error counter.
    ///
    /// Every variant is inserted by `new()`; a missing counter indicates a
    /// bug in initialization, which is logged rather than panicking.
    pub fn increment(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map",
                error
            );
        }
    }

    /// Records the counter-worthy aspect of an API error alongside whatever
    /// contextual counter the call site bumps itself.
    pub fn note_api_error(&self, error: &ApiError) {
        match error {
            ApiError::RateLimited => self.increment(ErrorType::RateLimited),
            ApiError::AuthRejected(_) => self.increment(ErrorType::AuthRejected),
            ApiError::Timeout => self.increment(ErrorType::RequestTimeout),
            ApiError::Transport(_) | ApiError::Status(_) | ApiError::Api(_) => {}
        }
    }

    /// Gets the count for an error type.
    pub fn count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Gets the total error count across all types.
    pub fn total(&self) -> usize {
        ErrorType::iter().map(|e| self.count(e)).sum()
    }
}

impl Default for AuditStats {
    fn default() -> Self {
        Self::new()
    }
}
