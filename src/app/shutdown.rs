//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Spawns a watcher that cancels `cancel` when the process receives a
/// shutdown signal.
///
/// Cancellation stops the dispatch loop from starting new zones; zones
/// already in flight run to completion so a record mutation is never
/// interrupted mid-write.
pub fn spawn_signal_watcher(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!(
                "Shutdown signal received; finishing in-flight zones, no new zones will start"
            );
            cancel.cancel();
        }
    })
}

/// Shuts down all background tasks gracefully.
///
/// Handles cancellation of the logging task and the rate limiter's
/// replenishment task.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
    rate_limiter_shutdown: Option<CancellationToken>,
) {
    // Signal logging task to stop and await it
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }

    // Signal rate limiter to stop if it exists
    if let Some(shutdown) = rate_limiter_shutdown {
        shutdown.cancel();
    }
}
