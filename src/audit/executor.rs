//! Remediation execution.
//!
//! Applies one planned action through the DNS write API and reports the
//! outcome. Exactly one mutation is issued per non-`NoOp` action; the
//! transport owns the retry policy, so the first outcome observed here is
//! final.

use log::warn;

use crate::cloudflare::{DnsApi, RecordPayload};
use crate::config::{CREATED_COMMENT, UPDATED_COMMENT};
use crate::policy::RecordAction;

use super::result::RemediationOutcome;

/// Failure reason reported when a rewrite was planned but the lookup
/// returned no record identifier to key it on.
pub const MISSING_RECORD_ID: &str = "missing record id";

/// Applies one planned action to one record host in a zone.
pub async fn execute(
    api: &dyn DnsApi,
    zone_id: &str,
    host: &str,
    action: &RecordAction,
    existing_record_id: Option<&str>,
) -> RemediationOutcome {
    match action {
        RecordAction::NoOp => RemediationOutcome::NoChange,
        RecordAction::Create { content } => {
            let payload = RecordPayload::txt(host, content.clone(), CREATED_COMMENT);
            match api.create_record(zone_id, &payload).await {
                Ok(()) => RemediationOutcome::Created,
                Err(e) => {
                    warn!("Create failed for {host} in zone {zone_id}: {e}");
                    RemediationOutcome::Failed(e.to_string())
                }
            }
        }
        RecordAction::Rewrite { content } => {
            // A rewrite without a record id means a policy state was derived
            // from content the lookup returned no identifier for; that
            // inconsistency is surfaced loudly, never skipped.
            let Some(record_id) = existing_record_id else {
                warn!("Rewrite planned for {host} in zone {zone_id} without a record id");
                return RemediationOutcome::Failed(MISSING_RECORD_ID.to_string());
            };
            let payload = RecordPayload::txt(host, content.clone(), UPDATED_COMMENT);
            match api.replace_record(zone_id, record_id, &payload).await {
                Ok(()) => RemediationOutcome::Updated,
                Err(e) => {
                    warn!("Replace failed for {host} in zone {zone_id}: {e}");
                    RemediationOutcome::Failed(e.to_string())
                }
            }
        }
    }
}
