// Shared test helpers: an in-memory DNS API fake for driving the audit
// engine without any network setup.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use dmarc_audit::cloudflare::{DnsApi, DnsRecord, RecordPayload, Zone};
use dmarc_audit::error_handling::ApiError;

/// One recorded write: (zone id, host, content, record id for replaces).
pub type WriteCall = (String, String, String, Option<String>);

/// In-memory Cloudflare fake.
///
/// Zones are returned in insertion order; TXT records are keyed by host
/// name. Lookups for a zone listed in `delay_zones` sleep before answering,
/// which lets tests scramble completion order deliberately.
#[derive(Default)]
pub struct FakeCloudflare {
    zones: Vec<Zone>,
    records: HashMap<String, Vec<DnsRecord>>,
    list_error: Option<ApiError>,
    delay_zones: HashMap<String, Duration>,
    writes: Mutex<Vec<WriteCall>>,
}

impl FakeCloudflare {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a zone named `name` with id `{name}-id`.
    pub fn with_zone(mut self, name: &str) -> Self {
        self.zones.push(Zone {
            id: format!("{name}-id"),
            name: name.to_string(),
        });
        self
    }

    /// Binds a TXT record to a host (e.g. `_dmarc.example.com` or the apex).
    pub fn with_record(mut self, host: &str, id: &str, content: &str) -> Self {
        self.records
            .entry(host.to_string())
            .or_default()
            .push(DnsRecord {
                id: id.to_string(),
                content: content.to_string(),
            });
        self
    }

    /// Makes zone enumeration fail with `error`.
    pub fn with_list_error(mut self, error: ApiError) -> Self {
        self.list_error = Some(error);
        self
    }

    /// Delays every lookup for `zone_id` by `delay`.
    pub fn with_lookup_delay(mut self, zone_id: &str, delay: Duration) -> Self {
        self.delay_zones.insert(zone_id.to_string(), delay);
        self
    }

    #[allow(dead_code)] // Used by some test files, not all
    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsApi for FakeCloudflare {
    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError> {
        match &self.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.zones.clone()),
        }
    }

    async fn get_txt_records(
        &self,
        zone_id: &str,
        host: &str,
    ) -> Result<Vec<DnsRecord>, ApiError> {
        if let Some(delay) = self.delay_zones.get(zone_id) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.records.get(host).cloned().unwrap_or_default())
    }

    async fn create_record(
        &self,
        zone_id: &str,
        payload: &RecordPayload,
    ) -> Result<(), ApiError> {
        self.writes.lock().unwrap().push((
            zone_id.to_string(),
            payload.name.clone(),
            payload.content.clone(),
            None,
        ));
        Ok(())
    }

    async fn replace_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<(), ApiError> {
        self.writes.lock().unwrap().push((
            zone_id.to_string(),
            payload.name.clone(),
            payload.content.clone(),
            Some(record_id.to_string()),
        ));
        Ok(())
    }
}
