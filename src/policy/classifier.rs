//! Policy classification for DMARC and SPF record content.
//!
//! Both classifiers are pure and total: malformed input always maps to
//! `Unknown` or `Missing`, never to an error.

use std::fmt;

use strum_macros::EnumIter as EnumIterMacro;

use super::tags;

/// Version marker identifying a DMARC policy record.
pub const DMARC_VERSION_MARKER: &str = "v=DMARC1";
/// Version marker identifying an SPF record.
pub const SPF_VERSION_MARKER: &str = "v=spf1";

/// Authentication posture derived from a record's raw content.
///
/// Recomputed from record content on every audit, never stored. `Reject`
/// is the only fully enforcing state; `Unknown` covers content the
/// classifier cannot confidently interpret and is deliberately left
/// untouched by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum PolicyState {
    /// No record of this type exists.
    Missing,
    /// DMARC `p=none`: monitoring only, no enforcement.
    None,
    /// DMARC `p=quarantine` / SPF `~all`: soft-fail.
    Quarantine,
    /// DMARC `p=reject` / SPF `-all`: full enforcement.
    Reject,
    /// SPF `+all`: explicitly permits any sender.
    Allow,
    /// Content present but no recognizable policy.
    Unknown,
}

impl PolicyState {
    /// The report label for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyState::Missing => "MISSING",
            PolicyState::None => "NONE",
            PolicyState::Quarantine => "QUARANTINE",
            PolicyState::Reject => "REJECT",
            PolicyState::Allow => "ALLOW",
            PolicyState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PolicyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the content carries the DMARC version marker.
pub fn is_dmarc_record(content: &str) -> bool {
    content.contains(DMARC_VERSION_MARKER)
}

/// True when the content carries the SPF version marker.
///
/// Lookups can return unrelated TXT records (site-verification strings and
/// the like); record selection must filter on this marker so classification
/// never keys on the first arbitrary record returned.
pub fn is_spf_record(content: &str) -> bool {
    content.contains(SPF_VERSION_MARKER)
}

/// Classifies DMARC record content.
///
/// Absent content is `Missing`. Otherwise the `p=` tag (case-insensitive
/// key, whitespace tolerated around the `=`) determines the state; a record
/// without a recognizable `p=` value is `Unknown`.
pub fn classify_dmarc(content: Option<&str>) -> PolicyState {
    let Some(content) = content else {
        return PolicyState::Missing;
    };
    let Some(value) = tags::tag_value(content, "p").and_then(tags::alnum_label) else {
        return PolicyState::Unknown;
    };
    match value.as_str() {
        "reject" => PolicyState::Reject,
        "quarantine" => PolicyState::Quarantine,
        "none" => PolicyState::None,
        _ => PolicyState::Unknown,
    }
}

/// Classifies SPF record content.
///
/// Absent content is `Missing`. Otherwise the qualifier on the catch-all
/// mechanism decides: `-all` enforces, `~all` soft-fails, `+all` permits
/// everything. A record with none of these terms is `Unknown`.
pub fn classify_spf(content: Option<&str>) -> PolicyState {
    let Some(content) = content else {
        return PolicyState::Missing;
    };
    for term in content.split_ascii_whitespace() {
        match term {
            "-all" => return PolicyState::Reject,
            "~all" => return PolicyState::Quarantine,
            "+all" => return PolicyState::Allow,
            _ => {}
        }
    }
    PolicyState::Unknown
}
