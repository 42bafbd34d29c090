//! Tests for CLI option parsing.

use std::path::PathBuf;

use clap::Parser;

use dmarc_audit::config::{MAX_CONCURRENCY, RATE_LIMIT_RPS, REQUEST_TIMEOUT_SECS};
use dmarc_audit::Opt;

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["dmarc_audit"]).expect("bare invocation should parse");

    assert!(!opt.autofix);
    assert!(!opt.vulnerable_only);
    assert!(opt.token.is_none());
    assert!(opt.env.is_none());
    assert!(opt.output.is_none());
    assert_eq!(opt.max_concurrency, MAX_CONCURRENCY);
    assert_eq!(opt.rate_limit_rps, RATE_LIMIT_RPS);
    assert_eq!(opt.timeout_seconds, REQUEST_TIMEOUT_SECS);
    // LogLevel/LogFormat don't implement PartialEq; compare via conversion
    assert_eq!(log::LevelFilter::from(opt.log_level), log::LevelFilter::Info);
}

#[test]
fn test_short_flags() {
    let opt = Opt::try_parse_from([
        "dmarc_audit",
        "-a",
        "-t",
        "abc123",
        "-o",
        "report.csv",
        "-v",
    ])
    .expect("short flags should parse");

    assert!(opt.autofix);
    assert!(opt.vulnerable_only);
    assert_eq!(opt.token.as_deref(), Some("abc123"));
    assert_eq!(opt.output, Some(PathBuf::from("report.csv")));
}

#[test]
fn test_long_flags_and_tuning() {
    let opt = Opt::try_parse_from([
        "dmarc_audit",
        "--autofix",
        "--token",
        "abc123",
        "--max-concurrency",
        "25",
        "--rate-limit-rps",
        "0",
        "--timeout-seconds",
        "30",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("long flags should parse");

    assert!(opt.autofix);
    assert_eq!(opt.max_concurrency, 25);
    assert_eq!(opt.rate_limit_rps, 0);
    assert_eq!(opt.timeout_seconds, 30);
    assert_eq!(log::LevelFilter::from(opt.log_level), log::LevelFilter::Debug);
}

#[test]
fn test_token_and_env_are_mutually_exclusive() {
    let result = Opt::try_parse_from([
        "dmarc_audit",
        "--token",
        "abc123",
        "--env",
        "CF_TOKEN",
    ]);
    assert!(result.is_err(), "--token and --env together should be rejected");
}

#[test]
fn test_unknown_flag_rejected() {
    assert!(Opt::try_parse_from(["dmarc_audit", "--frobnicate"]).is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Opt::try_parse_from(["dmarc_audit", "--log-level", "loud"]).is_err());
}

#[test]
fn test_into_config_carries_flags_through() {
    let opt = Opt::try_parse_from([
        "dmarc_audit",
        "--autofix",
        "--token",
        "abc123",
        "--output",
        "audit.csv",
        "--vulnerable-only",
    ])
    .unwrap();

    let config = opt.into_config().expect("config should resolve");
    assert!(config.autofix);
    assert!(config.vulnerable_only);
    assert_eq!(config.api_token, "abc123");
    assert_eq!(config.output, Some(PathBuf::from("audit.csv")));
}
