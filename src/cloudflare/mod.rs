//! Cloudflare DNS API transport.
//!
//! The audit engine only ever talks to the narrow [`DnsApi`] seam defined
//! here: zone enumeration, TXT lookup, and record create/replace. The HTTP
//! implementation lives in `client`; tests drive the engine through an
//! in-memory fake with no network setup.

mod client;
mod types;

pub use client::CloudflareApi;
pub use types::{DnsRecord, RecordPayload, Zone};

use async_trait::async_trait;

use crate::error_handling::ApiError;

/// The DNS operations the audit engine consumes.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Lists every zone in the account, exhausting pagination. A failure
    /// here is fatal to the run: there is nothing to audit without it.
    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError>;

    /// Fetches the TXT records bound to `host` in a zone. An empty vector
    /// is a valid, non-error response meaning the record does not exist.
    async fn get_txt_records(&self, zone_id: &str, host: &str)
        -> Result<Vec<DnsRecord>, ApiError>;

    /// Creates a record.
    async fn create_record(&self, zone_id: &str, payload: &RecordPayload)
        -> Result<(), ApiError>;

    /// Replaces an existing record in full, keyed by its identifier.
    async fn replace_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<(), ApiError>;
}
