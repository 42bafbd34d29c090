//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_TOKEN_ENV, MAX_CONCURRENCY, RATE_LIMIT_RPS, REQUEST_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Plain => f.write_str("plain"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct threaded through the audit engine.
/// It can be constructed programmatically without any CLI involvement,
/// which is how the integration tests drive the engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cloudflare API token. Validity is not checked up front; a rejected
    /// credential surfaces as a failed outcome on the first call.
    pub api_token: String,

    /// Apply remediation after classification
    pub autofix: bool,

    /// CSV report path (no file is written when `None`)
    pub output: Option<PathBuf>,

    /// Restrict the CSV report to vulnerable domains
    pub vulnerable_only: bool,

    /// Maximum concurrent zone audits
    pub max_concurrency: usize,

    /// Requests per second rate limit (0 disables limiting)
    pub rate_limit_rps: u32,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            autofix: false,
            output: None,
            vulnerable_only: false,
            max_concurrency: MAX_CONCURRENCY,
            rate_limit_rps: RATE_LIMIT_RPS,
            timeout_seconds: REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field
/// attributes. All options have sensible defaults and can be overridden
/// via command-line flags.
///
/// # Examples
///
/// ```bash
/// # Audit only, token from CLOUDFLARE_API_TOKEN
/// dmarc_audit
///
/// # Audit and remediate, CSV report of vulnerable domains only
/// dmarc_audit --autofix --output audit.csv --vulnerable-only
///
/// # Token from a custom environment variable
/// dmarc_audit --env CF_TOKEN
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "dmarc_audit",
    about = "Checks every Cloudflare zone in an account for weak DMARC and SPF policy, optionally tightening both to reject."
)]
pub struct Opt {
    /// Auto-secure weak DMARC and SPF records after the audit
    #[arg(short = 'a', long)]
    pub autofix: bool,

    /// Cloudflare API token
    #[arg(short = 't', long, conflicts_with = "env")]
    pub token: Option<String>,

    /// Environment variable holding the Cloudflare API token
    #[arg(short = 'e', long)]
    pub env: Option<String>,

    /// CSV report path (must end in '.csv'); no file is written when omitted
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Only include vulnerable domains in the CSV report
    #[arg(short = 'v', long)]
    pub vulnerable_only: bool,

    /// Maximum concurrent zone audits
    ///
    /// Bounded by the remote API's rate limit, not by available cores.
    #[arg(long, default_value_t = MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Requests per second rate limit (0 disables limiting)
    #[arg(long, default_value_t = RATE_LIMIT_RPS)]
    pub rate_limit_rps: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Resolves the API token and validates the output path, producing the
    /// library configuration.
    ///
    /// Token resolution order: `--token`, then the variable named by
    /// `--env`, then `CLOUDFLARE_API_TOKEN`. A missing token or an output
    /// path without a `.csv` extension is a startup error.
    pub fn into_config(self) -> Result<Config> {
        let api_token = match (self.token, self.env) {
            (Some(token), _) => token,
            (None, Some(var)) => std::env::var(&var)
                .map_err(|_| anyhow!("{var} environment variable not set"))?,
            (None, None) => std::env::var(DEFAULT_TOKEN_ENV).map_err(|_| {
                anyhow!(
                    "no API token: pass --token or --env, or set {DEFAULT_TOKEN_ENV}"
                )
            })?,
        };

        if let Some(output) = &self.output {
            if output.extension().and_then(|e| e.to_str()) != Some("csv") {
                bail!("output file must end in '.csv'");
            }
        }

        Ok(Config {
            api_token,
            autofix: self.autofix,
            output: self.output,
            vulnerable_only: self.vulnerable_only,
            max_concurrency: self.max_concurrency,
            rate_limit_rps: self.rate_limit_rps,
            timeout_seconds: self.timeout_seconds,
        })
    }
}
