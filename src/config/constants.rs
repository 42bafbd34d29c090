//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application: API endpoints, concurrency and retry tuning, and the
//! record content the remediation engine writes.

use std::time::Duration;

/// Cloudflare API v4 base URL.
pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Environment variable consulted for the API token when neither `--token`
/// nor `--env` is given.
pub const DEFAULT_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// Zones fetched per page when enumerating the account.
pub const ZONES_PER_PAGE: u32 = 50;

/// Maximum concurrent zone audits (semaphore limit).
///
/// Sized against the Cloudflare API rate limit (1200 requests per 5
/// minutes), not against available cores - each zone audit issues between
/// two and four requests.
pub const MAX_CONCURRENCY: usize = 10;

/// Default requests-per-second budget for the token-bucket rate limiter.
/// Set to 0 via `--rate-limit-rps` to disable limiting.
pub const RATE_LIMIT_RPS: u32 = 8;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Per-zone processing timeout.
///
/// Up to four lookups/writes at 10s each, plus retry backoff headroom.
/// A zone that exceeds this is reported as failed, never left hanging.
pub const ZONE_PROCESSING_TIMEOUT: Duration = Duration::from_secs(90);

/// Interval between progress log lines in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

// Remediation payloads
/// TTL applied to every record this tool creates or rewrites (1 hour).
pub const REMEDIATION_TTL: u32 = 3600;
/// Content written when a zone has no DMARC record at all.
pub const DEFAULT_DMARC_CONTENT: &str = "v=DMARC1; p=reject;";
/// Host name DMARC policy records are bound to.
pub const DMARC_HOST: &str = "_dmarc";
/// Comment attached to records created by the audit.
pub const CREATED_COMMENT: &str = "Created by dmarc_audit";
/// Comment attached to records rewritten by the audit.
pub const UPDATED_COMMENT: &str = "Updated by dmarc_audit";

// Retry strategy
/// Initial delay in milliseconds before the first retry.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which the retry delay is multiplied on each attempt.
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 15;
/// Maximum number of retries per request, after the initial attempt.
pub const RETRY_MAX_ATTEMPTS: usize = 3;

/// Placeholder written to reports when a zone has no record of a type.
pub const ABSENT_RECORD_SENTINEL: &str = "No Record Found";

/// HTTP status code for rate limiting.
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
