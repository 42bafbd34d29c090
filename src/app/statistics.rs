//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{AuditStats, ErrorType};

/// Prints a per-category error summary at the end of the run.
///
/// Quiet when the run was clean.
pub fn print_error_statistics(stats: &AuditStats) {
    if stats.total() == 0 {
        return;
    }
    info!("Error statistics:");
    for error_type in ErrorType::iter() {
        let count = stats.count(error_type);
        if count > 0 {
            info!("  {error_type}: {count}");
        }
    }
}
