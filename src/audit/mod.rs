//! Audit coordination.
//!
//! Drives one zone through its states: fetch the DMARC and SPF records,
//! classify both, optionally remediate each independently, then aggregate
//! into a [`DomainAuditResult`]. Zones are independent units of work: there
//! is no cross-zone state and no rollback.

mod executor;
mod result;

pub use executor::{execute, MISSING_RECORD_ID};
pub use result::{DomainAuditResult, RemediationOutcome};

use log::debug;

use crate::cloudflare::{DnsApi, Zone};
use crate::config::DMARC_HOST;
use crate::error_handling::{ApiError, AuditStats, ErrorType};
use crate::policy::{classifier, planner, PolicyState, RecordAction};

/// One record type's observed state: raw content plus the identifier
/// needed to rewrite it, or the lookup error that prevented observation.
struct ObservedRecord {
    content: Option<String>,
    record_id: Option<String>,
    lookup_error: Option<ApiError>,
}

/// Fetches the TXT records for `host` and picks the one matching
/// `is_match` (the version-marker predicate). An empty result or no
/// matching record is a legitimate "absent", not an error.
async fn observe(
    api: &dyn DnsApi,
    zone_id: &str,
    host: &str,
    is_match: fn(&str) -> bool,
) -> ObservedRecord {
    match api.get_txt_records(zone_id, host).await {
        Ok(records) => match records.into_iter().find(|r| is_match(&r.content)) {
            Some(record) => ObservedRecord {
                content: Some(record.content),
                record_id: Some(record.id),
                lookup_error: None,
            },
            None => ObservedRecord {
                content: None,
                record_id: None,
                lookup_error: None,
            },
        },
        Err(e) => ObservedRecord {
            content: None,
            record_id: None,
            lookup_error: Some(e),
        },
    }
}

/// Runs the planner and executor for one record type, tracking failures.
async fn remediate(
    api: &dyn DnsApi,
    zone_id: &str,
    host: &str,
    action: RecordAction,
    record_id: Option<&str>,
    stats: &AuditStats,
) -> RemediationOutcome {
    let failure_type = match &action {
        RecordAction::Create { .. } => ErrorType::RecordCreateError,
        RecordAction::Rewrite { .. } | RecordAction::NoOp => ErrorType::RecordUpdateError,
    };
    let outcome = executor::execute(api, zone_id, host, &action, record_id).await;
    if matches!(outcome, RemediationOutcome::Failed(_)) {
        stats.increment(failure_type);
    }
    outcome
}

/// Audits a single zone.
///
/// The two record types are looked up and remediated independently: a
/// failure on one never blocks the other. The returned result always
/// carries the *pre-remediation* classification, so the report reflects
/// the exposure that existed at audit time even when a fix landed.
pub async fn audit_zone(
    api: &dyn DnsApi,
    zone: &Zone,
    autofix: bool,
    stats: &AuditStats,
) -> DomainAuditResult {
    debug!("Auditing zone {} ({})", zone.name, zone.id);

    let dmarc_lookup_host = format!("{DMARC_HOST}.{}", zone.name);
    let dmarc = observe(api, &zone.id, &dmarc_lookup_host, classifier::is_dmarc_record).await;
    let spf = observe(api, &zone.id, &zone.name, classifier::is_spf_record).await;

    if let Some(e) = &dmarc.lookup_error {
        stats.increment(ErrorType::DmarcLookupError);
        stats.note_api_error(e);
    }
    if let Some(e) = &spf.lookup_error {
        stats.increment(ErrorType::SpfLookupError);
        stats.note_api_error(e);
    }

    // A failed lookup classifies as Unknown, never Missing: Missing would
    // plan a record creation off a transient error.
    let dmarc_state = match &dmarc.lookup_error {
        Some(_) => PolicyState::Unknown,
        None => classifier::classify_dmarc(dmarc.content.as_deref()),
    };
    let spf_state = match &spf.lookup_error {
        Some(_) => PolicyState::Unknown,
        None => classifier::classify_spf(spf.content.as_deref()),
    };

    let dmarc_outcome = if let Some(e) = &dmarc.lookup_error {
        RemediationOutcome::Failed(e.to_string())
    } else if autofix {
        let action = planner::plan_dmarc(dmarc_state, dmarc.content.as_deref());
        remediate(
            api,
            &zone.id,
            DMARC_HOST,
            action,
            dmarc.record_id.as_deref(),
            stats,
        )
        .await
    } else {
        RemediationOutcome::NoChange
    };

    let spf_outcome = if let Some(e) = &spf.lookup_error {
        RemediationOutcome::Failed(e.to_string())
    } else if autofix {
        let action = planner::plan_spf(spf_state, spf.content.as_deref());
        remediate(
            api,
            &zone.id,
            &zone.name,
            action,
            spf.record_id.as_deref(),
            stats,
        )
        .await
    } else {
        RemediationOutcome::NoChange
    };

    DomainAuditResult {
        zone_name: zone.name.clone(),
        dmarc_state,
        spf_state,
        dmarc_content: dmarc.content,
        spf_content: spf.content,
        dmarc_outcome,
        spf_outcome,
    }
}
