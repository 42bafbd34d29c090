//! Remediation planning.
//!
//! Deterministic rules mapping a classified policy state to the action that
//! tightens it. The planner never touches the network and computes the full
//! target content up front, so every plan is checkable against literal
//! strings. Running the planner on an already-compliant or unrecognized
//! state always yields `NoOp`, which makes remediation idempotent.

use crate::config::DEFAULT_DMARC_CONTENT;

use super::classifier::PolicyState;
use super::tags;

/// Remediation decision for a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAction {
    /// Leave the record alone. No network call is made for this action.
    NoOp,
    /// Create a record with the given content where none exists.
    Create {
        /// Full content of the record to create.
        content: String,
    },
    /// Replace the existing record's content in full.
    Rewrite {
        /// Full replacement content.
        content: String,
    },
}

/// Plans the DMARC remediation for a zone.
///
/// A missing record gets the enforcing default; `none` and `quarantine`
/// policies are rewritten to `reject` with every other tag preserved
/// verbatim. An unrecognized policy is left untouched rather than guessed
/// at.
pub fn plan_dmarc(state: PolicyState, content: Option<&str>) -> RecordAction {
    match state {
        PolicyState::Missing => RecordAction::Create {
            content: DEFAULT_DMARC_CONTENT.to_string(),
        },
        PolicyState::None | PolicyState::Quarantine => {
            match content.and_then(|c| tags::rewrite_tag(c, "p", "reject")) {
                Some(content) => RecordAction::Rewrite { content },
                // These states imply a parsed p= tag; without content to
                // rewrite the only safe plan is to stand down.
                None => RecordAction::NoOp,
            }
        }
        PolicyState::Reject | PolicyState::Allow | PolicyState::Unknown => RecordAction::NoOp,
    }
}

/// Plans the SPF remediation for a zone.
///
/// Permissive catch-alls (`+all`, `~all`) are rewritten to `-all` with all
/// other mechanisms preserved verbatim. An absent SPF record is never
/// synthesized: a wrong default could break mail delivery for a domain with
/// no configured mail infrastructure, an asymmetry with DMARC that is
/// intentional.
pub fn plan_spf(state: PolicyState, content: Option<&str>) -> RecordAction {
    match state {
        PolicyState::Allow | PolicyState::Quarantine => match content {
            Some(content) => RecordAction::Rewrite {
                content: rewrite_spf_catch_all(content),
            },
            None => RecordAction::NoOp,
        },
        PolicyState::Reject
        | PolicyState::Missing
        | PolicyState::None
        | PolicyState::Unknown => RecordAction::NoOp,
    }
}

/// Replaces permissive catch-all qualifiers with `-all`, term by term,
/// leaving every other term and the original spacing intact.
pub fn rewrite_spf_catch_all(content: &str) -> String {
    content
        .split(' ')
        .map(|term| match term {
            "+all" | "~all" => "-all",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}
