//! Cloudflare API wire types.

use serde::{Deserialize, Serialize};

use crate::config::REMEDIATION_TTL;

/// A DNS zone in the account. Immutable once fetched; owned by the audit
/// run that fetched it.
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    /// Opaque zone identifier.
    pub id: String,
    /// Domain name of the zone.
    pub name: String,
}

/// A TXT record as returned by the record query endpoint.
///
/// The identifier keys later replacement; content is the raw record text.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecord {
    /// Record identifier, the key for later replacement.
    pub id: String,
    /// Raw record text.
    pub content: String,
}

/// Body sent to the record create and replace endpoints.
///
/// Replacement is a full-record PUT: every field is sent, never a partial
/// patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    /// Record type, always `TXT` here.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Host name the record is bound to.
    pub name: String,
    /// Full record content.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Optional provenance note shown in the Cloudflare dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RecordPayload {
    /// A TXT payload with the standard remediation TTL.
    pub fn txt(name: &str, content: String, comment: &str) -> Self {
        RecordPayload {
            record_type: "TXT".to_string(),
            name: name.to_string(),
            content,
            ttl: REMEDIATION_TTL,
            comment: Some(comment.to_string()),
        }
    }
}

/// Standard Cloudflare v4 response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the API accepted the request.
    pub success: bool,
    /// Error messages when `success` is false.
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    /// The endpoint's payload.
    pub result: Option<T>,
    /// Pagination metadata on list endpoints.
    pub result_info: Option<ResultInfo>,
}

/// An error or informational message in the envelope.
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    /// Cloudflare error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Deserialize)]
pub struct ResultInfo {
    /// Current page number.
    pub page: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_payload_serializes_type_field() {
        let payload = RecordPayload::txt("_dmarc", "v=DMARC1; p=reject;".into(), "note");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "TXT");
        assert_eq!(json["name"], "_dmarc");
        assert_eq!(json["ttl"], REMEDIATION_TTL);
        assert_eq!(json["comment"], "note");
    }

    #[test]
    fn test_record_payload_omits_absent_comment() {
        let payload = RecordPayload {
            record_type: "TXT".into(),
            name: "_dmarc".into(),
            content: "v=DMARC1; p=reject;".into(),
            ttl: REMEDIATION_TTL,
            comment: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn test_envelope_deserializes_zone_list() {
        let body = r#"{
            "success": true,
            "errors": [],
            "result": [{"id": "z1", "name": "example.com"}],
            "result_info": {"page": 1, "total_pages": 1}
        }"#;
        let envelope: ApiEnvelope<Vec<Zone>> = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        let zones = envelope.result.unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "example.com");
        assert_eq!(envelope.result_info.unwrap().total_pages, 1);
    }

    #[test]
    fn test_envelope_deserializes_failure() {
        let body = r#"{
            "success": false,
            "errors": [{"code": 9109, "message": "Invalid access token"}],
            "result": null,
            "result_info": null
        }"#;
        let envelope: ApiEnvelope<Vec<Zone>> = serde_json::from_str(body).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.errors[0].message, "Invalid access token");
        assert!(envelope.result.is_none());
    }
}
