//! CSV report sink.
//!
//! Persists the audit results to a delimited file with a fixed header.
//! One row per domain; absent records render a fixed sentinel string.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::audit::DomainAuditResult;
use crate::config::ABSENT_RECORD_SENTINEL;

/// The fixed CSV header row.
pub const CSV_HEADER: [&str; 5] = [
    "Domain Name",
    "DMARC Rule",
    "SPF Rule",
    "Raw DMARC Record",
    "Raw SPF Record",
];

/// Writes the report to `path`, optionally restricted to vulnerable
/// domains. Rows follow the order of `results`.
///
/// # Returns
///
/// The number of data rows written (excluding the header).
pub fn write_report(
    path: &Path,
    results: &[DomainAuditResult],
    vulnerable_only: bool,
) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(CSV_HEADER)?;

    let mut rows = 0usize;
    for result in results
        .iter()
        .filter(|r| !vulnerable_only || r.is_vulnerable())
    {
        writer.write_record([
            result.zone_name.as_str(),
            result.dmarc_state.as_str(),
            result.spf_state.as_str(),
            result.dmarc_content.as_deref().unwrap_or(ABSENT_RECORD_SENTINEL),
            result.spf_content.as_deref().unwrap_or(ABSENT_RECORD_SENTINEL),
        ])?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}
