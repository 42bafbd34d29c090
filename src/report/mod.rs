//! Report sinks.
//!
//! The audit engine hands each sink the same `DomainAuditResult` rows: the
//! console sink renders a live table as zones complete, the CSV sink
//! persists the final sequence.

pub mod console;
pub mod csv;
