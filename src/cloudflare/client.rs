//! HTTP implementation of the Cloudflare v4 API.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio_retry::RetryIf;

use crate::config::{API_BASE_URL, ZONES_PER_PAGE};
use crate::error_handling::{get_retry_strategy, is_retriable_error, ApiError};

use super::types::{ApiEnvelope, DnsRecord, RecordPayload, Zone};
use super::DnsApi;

/// Cloudflare API client: reqwest transport plus the retry layer.
///
/// Rate-limit responses (HTTP 429) and transient network failures retry
/// with bounded exponential backoff before an error surfaces to the
/// caller; other 4xx statuses are permanent and fail on the first attempt.
/// The credential rides in the client's default headers; a rejected one
/// shows up as `ApiError::AuthRejected` on the first call.
pub struct CloudflareApi {
    client: Arc<Client>,
    base_url: String,
}

impl CloudflareApi {
    /// Wraps an authenticated client, targeting the production API root.
    pub fn new(client: Arc<Client>) -> Self {
        CloudflareApi {
            client,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different API root (test servers).
    pub fn with_base_url(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        CloudflareApi {
            client,
            base_url: base_url.into(),
        }
    }

    /// Sends a request built by `build`, retrying transient failures.
    ///
    /// The builder closure runs once per attempt because a `RequestBuilder`
    /// is consumed on send.
    async fn request<T, F>(&self, build: F) -> Result<ApiEnvelope<T>, ApiError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        RetryIf::spawn(
            get_retry_strategy(),
            || dispatch::<T>(build()),
            |error: &ApiError| {
                let retry = is_retriable_error(error);
                if retry {
                    debug!("Retrying after transient API error: {error}");
                }
                retry
            },
        )
        .await
    }
}

/// Sends one request and maps the response into the error taxonomy.
async fn dispatch<T: DeserializeOwned>(request: RequestBuilder) -> Result<ApiEnvelope<T>, ApiError> {
    let response = request.send().await.map_err(ApiError::from_reqwest)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16()));
    }
    let envelope: ApiEnvelope<T> = response.json().await.map_err(ApiError::from_reqwest)?;
    if !envelope.success {
        let messages: Vec<String> = envelope
            .errors
            .iter()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .collect();
        return Err(ApiError::Api(messages.join("; ")));
    }
    Ok(envelope)
}

#[async_trait]
impl DnsApi for CloudflareApi {
    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError> {
        let url = format!("{}/zones", self.base_url);
        let mut zones = Vec::new();
        let mut page: u32 = 1;
        loop {
            let envelope: ApiEnvelope<Vec<Zone>> = self
                .request(|| {
                    self.client
                        .get(&url)
                        .query(&[("per_page", ZONES_PER_PAGE), ("page", page)])
                })
                .await?;
            let batch = envelope.result.unwrap_or_default();
            if batch.is_empty() {
                break;
            }
            zones.extend(batch);
            debug!("Fetched zone page {page} ({} zones so far)", zones.len());
            if let Some(info) = envelope.result_info {
                if info.page >= info.total_pages {
                    break;
                }
            }
            page += 1;
        }
        Ok(zones)
    }

    async fn get_txt_records(
        &self,
        zone_id: &str,
        host: &str,
    ) -> Result<Vec<DnsRecord>, ApiError> {
        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        let envelope: ApiEnvelope<Vec<DnsRecord>> = self
            .request(|| self.client.get(&url).query(&[("type", "TXT"), ("name", host)]))
            .await?;
        Ok(envelope.result.unwrap_or_default())
    }

    async fn create_record(
        &self,
        zone_id: &str,
        payload: &RecordPayload,
    ) -> Result<(), ApiError> {
        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        self.request::<serde_json::Value, _>(|| self.client.post(&url).json(payload))
            .await?;
        Ok(())
    }

    async fn replace_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, zone_id, record_id
        );
        self.request::<serde_json::Value, _>(|| self.client.put(&url).json(payload))
            .await?;
        Ok(())
    }
}
