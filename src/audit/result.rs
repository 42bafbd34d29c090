//! Per-domain audit results.

use std::fmt;

use crate::policy::PolicyState;

/// Outcome of one remediation attempt on one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationOutcome {
    /// Nothing needed changing, or autofix was off.
    NoChange,
    /// A new record was written.
    Created,
    /// An existing record was replaced.
    Updated,
    /// The attempt failed; the reason string appears in the report.
    Failed(String),
}

impl fmt::Display for RemediationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemediationOutcome::NoChange => f.write_str("No Change"),
            RemediationOutcome::Created => f.write_str("Created"),
            RemediationOutcome::Updated => f.write_str("Updated"),
            RemediationOutcome::Failed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

/// Everything the report needs to know about one zone.
///
/// Policy states and raw content reflect what the audit observed *before*
/// any remediation ran: remediation can fail, and the report must show the
/// exposure that actually existed at audit time, not the intended one.
#[derive(Debug, Clone)]
pub struct DomainAuditResult {
    /// Domain name of the audited zone.
    pub zone_name: String,
    /// DMARC posture observed at audit time.
    pub dmarc_state: PolicyState,
    /// SPF posture observed at audit time.
    pub spf_state: PolicyState,
    /// Raw DMARC record content, `None` when absent.
    pub dmarc_content: Option<String>,
    /// Raw SPF record content, `None` when absent.
    pub spf_content: Option<String>,
    /// What the DMARC remediation attempt did.
    pub dmarc_outcome: RemediationOutcome,
    /// What the SPF remediation attempt did.
    pub spf_outcome: RemediationOutcome,
}

impl DomainAuditResult {
    /// A domain is exposed unless DMARC enforces `reject`. SPF is flagged
    /// only when a record exists with a policy weaker than `-all`: the
    /// absence of SPF is not treated like a weak SPF.
    pub fn is_vulnerable(&self) -> bool {
        self.dmarc_state != PolicyState::Reject
            || !matches!(
                self.spf_state,
                PolicyState::Reject | PolicyState::Missing
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(dmarc: PolicyState, spf: PolicyState) -> DomainAuditResult {
        DomainAuditResult {
            zone_name: "example.com".to_string(),
            dmarc_state: dmarc,
            spf_state: spf,
            dmarc_content: None,
            spf_content: None,
            dmarc_outcome: RemediationOutcome::NoChange,
            spf_outcome: RemediationOutcome::NoChange,
        }
    }

    #[test]
    fn test_reject_with_missing_spf_is_compliant() {
        assert!(!result(PolicyState::Reject, PolicyState::Missing).is_vulnerable());
        assert!(!result(PolicyState::Reject, PolicyState::Reject).is_vulnerable());
    }

    #[test]
    fn test_permissive_spf_is_vulnerable_despite_dmarc_reject() {
        assert!(result(PolicyState::Reject, PolicyState::Allow).is_vulnerable());
        assert!(result(PolicyState::Reject, PolicyState::Quarantine).is_vulnerable());
        assert!(result(PolicyState::Reject, PolicyState::Unknown).is_vulnerable());
    }

    #[test]
    fn test_weak_dmarc_is_vulnerable_despite_spf_reject() {
        assert!(result(PolicyState::None, PolicyState::Reject).is_vulnerable());
        assert!(result(PolicyState::Quarantine, PolicyState::Reject).is_vulnerable());
        assert!(result(PolicyState::Missing, PolicyState::Reject).is_vulnerable());
        assert!(result(PolicyState::Unknown, PolicyState::Reject).is_vulnerable());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(RemediationOutcome::NoChange.to_string(), "No Change");
        assert_eq!(RemediationOutcome::Created.to_string(), "Created");
        assert_eq!(RemediationOutcome::Updated.to_string(), "Updated");
        assert_eq!(
            RemediationOutcome::Failed("missing record id".into()).to_string(),
            "Failed: missing record id"
        );
    }
}
