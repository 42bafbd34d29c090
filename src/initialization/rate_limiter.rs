//! Request rate limiting.
//!
//! This module provides a token-bucket rate limiter for keeping the audit
//! under the remote API's request budget.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;

/// Token-bucket rate limiter.
///
/// Tokens are replenished by a background task at the configured rate;
/// each zone task consumes one token before it starts issuing requests.
/// The bucket holds at most one second's worth of tokens, so a stall never
/// banks an unbounded burst.
pub struct RateLimiter {
    permits: Arc<Semaphore>,
}

impl RateLimiter {
    /// Waits for and consumes one token.
    pub async fn acquire(&self) {
        if let Ok(permit) = self.permits.acquire().await {
            // Consume the token: returning it on drop would make the bucket
            // bottomless.
            permit.forget();
        }
    }
}

/// Initializes a token-bucket rate limiter.
///
/// If `rps` is 0, rate limiting is disabled and `None` is returned.
/// Otherwise returns the limiter plus the cancellation token that shuts
/// down its replenishment task.
pub fn init_rate_limiter(rps: u32) -> Option<(Arc<RateLimiter>, CancellationToken)> {
    if rps == 0 {
        return None;
    }
    let capacity = rps as usize;
    let shutdown = CancellationToken::new();
    let shutdown_for_task = shutdown.clone();

    let limiter = Arc::new(RateLimiter {
        permits: Arc::new(Semaphore::new(capacity)),
    });

    let permits = Arc::clone(&limiter.permits);
    tokio::spawn(async move {
        // Fast ticker; fractional tokens carry over so low rates still
        // replenish accurately
        let mut ticker = interval(Duration::from_millis(100));
        let mut last_tick = tokio::time::Instant::now();
        let mut fractional = 0.0f64;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = tokio::time::Instant::now();
                    let elapsed = now.duration_since(last_tick);
                    last_tick = now;

                    let earned = f64::from(rps) * elapsed.as_secs_f64() + fractional;
                    let whole = earned.floor() as usize;
                    fractional = earned - whole as f64;

                    let available = permits.available_permits();
                    if whole > 0 && available < capacity {
                        permits.add_permits(whole.min(capacity - available));
                    }
                }
                _ = shutdown_for_task.cancelled() => {
                    log::debug!("Rate limiter background task shutting down");
                    break;
                }
            }
        }
    });

    Some((limiter, shutdown))
}
