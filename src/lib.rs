//! dmarc_audit library: email-authentication policy audit and remediation.
//!
//! This library checks every Cloudflare zone in an account for weak DMARC
//! and SPF policy, optionally tightening both to `reject`, and aggregates
//! per-domain results for reporting.
//!
//! # Example
//!
//! ```no_run
//! use dmarc_audit::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_token: std::env::var("CLOUDFLARE_API_TOKEN")?,
//!     autofix: false,
//!     ..Default::default()
//! };
//!
//! let report = run_audit(config).await?;
//! println!(
//!     "{} of {} domains are exposed to spoofing",
//!     report.vulnerable, report.total_zones
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions from within an async context.

#![warn(missing_docs)]

mod app;
pub mod audit;
pub mod cloudflare;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod policy;
pub mod report;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use run::{run_audit, run_audit_with, AuditReport};

// Internal run module (contains the main audit orchestration)
mod run {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        log_progress, print_error_statistics, shutdown_gracefully, spawn_signal_watcher,
    };
    use crate::audit::{audit_zone, DomainAuditResult, RemediationOutcome};
    use crate::cloudflare::{CloudflareApi, DnsApi, Zone};
    use crate::config::{Config, LOGGING_INTERVAL_SECS, ZONE_PROCESSING_TIMEOUT};
    use crate::error_handling::{AuditStats, ErrorType};
    use crate::initialization::{init_client, init_rate_limiter, init_semaphore};
    use crate::policy::PolicyState;
    use crate::report;

    /// Results of a completed audit run.
    ///
    /// Contains the full result sequence in zone-listing order plus summary
    /// counts.
    #[derive(Debug)]
    pub struct AuditReport {
        /// One result per audited zone, in zone-listing order.
        pub results: Vec<DomainAuditResult>,
        /// Number of zones the account listing returned.
        pub total_zones: usize,
        /// Number of domains failing the vulnerability predicate.
        pub vulnerable: usize,
        /// Number of domains with at least one failed remediation or lookup.
        pub remediation_failures: usize,
        /// Where the CSV report was written, if anywhere.
        pub output: Option<PathBuf>,
        /// Elapsed wall-clock time in seconds.
        pub elapsed_seconds: f64,
    }

    impl AuditReport {
        /// The vulnerable subset, in zone-listing order.
        pub fn vulnerable_results(&self) -> impl Iterator<Item = &DomainAuditResult> {
            self.results.iter().filter(|r| r.is_vulnerable())
        }
    }

    /// Runs a full audit against the Cloudflare API.
    ///
    /// This is the main entry point for the library: it enumerates the
    /// account's zones, audits them concurrently, optionally remediates,
    /// renders the console report, and writes the CSV report when
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized, if zone
    /// enumeration fails (there is nothing to audit without it), or if the
    /// CSV report cannot be written. Per-domain failures are captured in
    /// the result rows and never abort the run.
    pub async fn run_audit(config: Config) -> Result<AuditReport> {
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let api: Arc<dyn DnsApi> = Arc::new(CloudflareApi::new(client));
        run_audit_with(api, config).await
    }

    /// Runs a full audit against any [`DnsApi`] implementation.
    ///
    /// Split out from [`run_audit`] so the orchestration is testable
    /// against an in-memory API fake.
    pub async fn run_audit_with(api: Arc<dyn DnsApi>, config: Config) -> Result<AuditReport> {
        let start_time = std::time::Instant::now();

        info!("Fetching zone list...");
        let zones = api
            .list_zones()
            .await
            .context("Failed to enumerate zones")?;
        let total_zones = zones.len();
        report::console::print_banner(&format!("Found {total_zones} domains."));
        report::console::print_banner("Auditing DMARC and SPF Records");
        report::console::print_header();

        let stats = Arc::new(AuditStats::new());
        let semaphore = init_semaphore(config.max_concurrency);
        let (rate_limiter, rate_limiter_shutdown) =
            match init_rate_limiter(config.rate_limit_rps) {
                Some((limiter, shutdown)) => (Some(limiter), Some(shutdown)),
                None => (None, None),
            };

        let cancel = CancellationToken::new();
        let signal_task = spawn_signal_watcher(cancel.clone());

        let completed_zones = Arc::new(AtomicUsize::new(0));
        let cancel_logging = cancel.child_token();
        let completed_for_logging = Arc::clone(&completed_zones);
        let logging_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(
                LOGGING_INTERVAL_SECS,
            ));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &completed_for_logging, total_zones);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        });

        let mut tasks = FuturesUnordered::new();
        for (index, zone) in zones.into_iter().enumerate() {
            // After a shutdown signal the queue is drained without further
            // dequeues; in-flight zones finish on their own
            if cancel.is_cancelled() {
                warn!("Skipping remaining zones after shutdown signal");
                break;
            }

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping zone: {}", zone.name);
                    continue;
                }
            };

            let api = Arc::clone(&api);
            let stats = Arc::clone(&stats);
            let completed_zones = Arc::clone(&completed_zones);
            let rate_limiter = rate_limiter.as_ref().map(Arc::clone);
            let autofix = config.autofix;
            tasks.push(tokio::spawn(async move {
                let _permit = permit;

                if let Some(limiter) = rate_limiter {
                    limiter.acquire().await;
                }

                let result = match tokio::time::timeout(
                    ZONE_PROCESSING_TIMEOUT,
                    audit_zone(api.as_ref(), &zone, autofix, &stats),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => {
                        stats.increment(ErrorType::ZoneProcessingTimeout);
                        warn!("Timed out auditing zone {}", zone.name);
                        timed_out_result(&zone)
                    }
                };

                report::console::print_row(&result);
                completed_zones.fetch_add(1, Ordering::SeqCst);
                (index, result)
            }));
        }

        let mut indexed: Vec<(usize, DomainAuditResult)> = Vec::with_capacity(total_zones);
        while let Some(task_result) = tasks.next().await {
            match task_result {
                Ok(entry) => indexed.push(entry),
                Err(join_error) => warn!("Zone task panicked: {:?}", join_error),
            }
        }

        signal_task.abort();
        shutdown_gracefully(cancel, Some(logging_task), rate_limiter_shutdown).await;

        // Rows printed in completion order above; the report itself replays
        // zone-listing order
        indexed.sort_by_key(|(index, _)| *index);
        let results: Vec<DomainAuditResult> =
            indexed.into_iter().map(|(_, result)| result).collect();

        let vulnerable = results.iter().filter(|r| r.is_vulnerable()).count();
        let remediation_failures = results
            .iter()
            .filter(|r| {
                matches!(r.dmarc_outcome, RemediationOutcome::Failed(_))
                    || matches!(r.spf_outcome, RemediationOutcome::Failed(_))
            })
            .count();

        if let Some(path) = &config.output {
            let rows = report::csv::write_report(path, &results, config.vulnerable_only)
                .context("Failed to write CSV report")?;
            info!("Wrote {rows} rows to {}", path.display());
        }

        log_progress(start_time, &completed_zones, total_zones);
        print_error_statistics(&stats);
        report::console::print_banner(&format!(
            "DONE.\n{vulnerable} domains have DMARC or SPF misconfigured."
        ));

        Ok(AuditReport {
            results,
            total_zones,
            vulnerable,
            remediation_failures,
            output: config.output,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Result row for a zone whose audit exceeded the processing timeout.
    fn timed_out_result(zone: &Zone) -> DomainAuditResult {
        let reason = "zone processing timed out".to_string();
        DomainAuditResult {
            zone_name: zone.name.clone(),
            dmarc_state: PolicyState::Unknown,
            spf_state: PolicyState::Unknown,
            dmarc_content: None,
            spf_content: None,
            dmarc_outcome: RemediationOutcome::Failed(reason.clone()),
            spf_outcome: RemediationOutcome::Failed(reason),
        }
    }
}
