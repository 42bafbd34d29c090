//! Console report sink.
//!
//! Renders a live, fixed-width table: the header once up front, then one
//! row per domain as its audit completes. Rows print in completion order;
//! the persisted report is what preserves zone-listing order.

use colored::Colorize;

use crate::audit::DomainAuditResult;

const TABLE_WIDTH: usize = 114;

/// Prints a framed banner message.
pub fn print_banner(message: &str) {
    println!();
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!("{message}");
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!();
}

/// Prints the audit table header.
pub fn print_header() {
    println!(
        "{:<30} | {:<16} | {:<16} | {:<21} | {:<21}",
        "DOMAIN", "DMARC Policy", "SPF Policy", "DMARC Status", "SPF Status"
    );
    println!("{}", "-".repeat(TABLE_WIDTH));
}

/// Prints one result row, colored by exposure.
pub fn print_row(result: &DomainAuditResult) {
    let line = format!(
        "{:<30} | {:<16} | {:<16} | {:<21} | {:<21}",
        result.zone_name,
        result.dmarc_state.as_str(),
        result.spf_state.as_str(),
        result.dmarc_outcome.to_string(),
        result.spf_outcome.to_string()
    );
    if result.is_vulnerable() {
        println!("{}", line.red());
    } else {
        println!("{}", line.green());
    }
}
