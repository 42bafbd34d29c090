//! Error type definitions.
//!
//! This module defines the error types used by the transport and
//! orchestration layers, and the error categories tracked in run
//! statistics.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    /// The API token cannot be carried in an HTTP header.
    #[error("Invalid API token: {0}")]
    InvalidCredential(String),
}

/// Errors surfaced by the Cloudflare API transport.
///
/// Carried as owned strings rather than source errors so outcomes can be
/// cloned into per-domain report rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure: connect error, protocol error, broken body.
    #[error("network error: {0}")]
    Transport(String),

    /// The request exceeded the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The API rejected the credential (HTTP 401 or 403). Never retried.
    #[error("authentication rejected (HTTP {0})")]
    AuthRejected(u16),

    /// HTTP 429. Retried with bounded backoff before being reported.
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    /// Any other non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// A 2xx response whose envelope carried `success: false`.
    #[error("API error: {0}")]
    Api(String),
}

impl ApiError {
    /// Maps a transport-layer failure into the taxonomy.
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(error.to_string())
        }
    }

    /// Maps a non-success HTTP status into the taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiError::AuthRejected(status),
            crate::config::HTTP_STATUS_TOO_MANY_REQUESTS => ApiError::RateLimited,
            other => ApiError::Status(other),
        }
    }
}

/// Categories of errors tracked across an audit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Zone enumeration failed (fatal to the run).
    ZoneListError,
    /// A `_dmarc` TXT lookup failed after retries.
    DmarcLookupError,
    /// An apex TXT lookup failed after retries.
    SpfLookupError,
    /// A record create failed.
    RecordCreateError,
    /// A record replace failed.
    RecordUpdateError,
    /// A request was rate limited (counted once per surfaced error).
    RateLimited,
    /// The API rejected the credential.
    AuthRejected,
    /// A single request timed out.
    RequestTimeout,
    /// A whole zone audit exceeded its processing timeout.
    ZoneProcessingTimeout,
}

impl ErrorType {
    /// The label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ZoneListError => "Zone listing error",
            ErrorType::DmarcLookupError => "DMARC lookup error",
            ErrorType::SpfLookupError => "SPF lookup error",
            ErrorType::RecordCreateError => "Record create error",
            ErrorType::RecordUpdateError => "Record update error",
            ErrorType::RateLimited => "Rate limited",
            ErrorType::AuthRejected => "Authentication rejected",
            ErrorType::RequestTimeout => "Request timeout",
            ErrorType::ZoneProcessingTimeout => "Zone processing timeout",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
