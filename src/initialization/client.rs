//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the authenticated HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - The bearer token in the default headers (marked sensitive so it never
///   appears in debug output)
/// - The per-request timeout from the configuration
///
/// Token validity is not checked here; a rejected credential surfaces on
/// the first API call.
///
/// # Errors
///
/// Returns an `InitializationError` if the token cannot be carried in an
/// HTTP header or client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
        .map_err(|e| InitializationError::InvalidCredential(e.to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);

    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()?;
    Ok(Arc::new(client))
}
