//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dmarc_audit` library that handles:
//! - Command-line argument parsing
//! - API token resolution
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use dmarc_audit::initialization::init_logger_with;
use dmarc_audit::{run_audit, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    let log_level = opt.log_level.clone();
    let log_format = opt.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Token resolution and output validation happen before any network work
    let config = match opt.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dmarc_audit error: {e:#}");
            process::exit(1);
        }
    };

    match run_audit(config).await {
        Ok(report) => {
            println!(
                "Audited {} zone{} in {:.1}s - {} vulnerable, {} with failures",
                report.total_zones,
                if report.total_zones == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.vulnerable,
                report.remediation_failures
            );
            if let Some(path) = &report.output {
                println!("Report saved to {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("dmarc_audit error: {e:#}");
            process::exit(1);
        }
    }
}
