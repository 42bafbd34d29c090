//! Retry strategy and error retriability.

use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

use super::types::ApiError;

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR` (doubles delay each retry)
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - Maximum attempts: `RETRY_MAX_ATTEMPTS` (prevents unbounded retries)
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS)
}

/// Determines whether an API error is worth retrying.
///
/// Rate limiting (HTTP 429), timeouts, transport failures, and server
/// errors are transient and retried with backoff. A rejected credential or
/// any other 4xx indicates a permanent request problem and is never
/// retried.
pub fn is_retriable_error(error: &ApiError) -> bool {
    match error {
        ApiError::RateLimited | ApiError::Timeout | ApiError::Transport(_) => true,
        ApiError::Status(code) => (500..600).contains(code),
        ApiError::AuthRejected(_) | ApiError::Api(_) => false,
    }
}
