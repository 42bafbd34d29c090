//! Progress logging utilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::info;

/// Logs progress information about zone processing.
pub fn log_progress(
    start_time: std::time::Instant,
    completed_zones: &Arc<AtomicUsize>,
    total_zones: usize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed_zones.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Audited {}/{} zones in {:.2} seconds (~{:.2} zones/sec)",
        completed, total_zones, elapsed_secs, rate
    );
}
