//! Customer record payloads exchanged with the record store.

use crate::{RecordId, lenient_text};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Customer record as held by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    /// Store-assigned id, immutable after creation.
    ///
    /// Required, and must be a string or an integer; a record without a
    /// usable id cannot be updated, so it fails to decode.
    pub id: RecordId,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,
    /// ISO-8601 creation timestamp, as stored.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    /// Fields the store returns that this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomerRecord {
    /// Minimal record with only an id.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            gender: None,
            country: None,
            created_at: None,
            extra: Map::new(),
        }
    }

    /// Copy of this record with the editable fields replaced by the draft.
    ///
    /// Every other field, including unknown ones, is carried over so the
    /// result can be sent as a full-record update.
    pub fn with_draft(&self, draft: &CustomerDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            gender: Some(draft.gender.clone()),
            country: Some(draft.country.clone()),
            ..self.clone()
        }
    }
}

/// The three editable fields collected by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub gender: String,
    pub country: String,
}

impl CustomerDraft {
    /// Whether every field is non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.gender.is_empty() && !self.country.is_empty()
    }
}

/// Create request body; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub country: String,
    pub gender: String,
    pub created_at: String,
}

impl NewCustomer {
    /// Build a create body stamped with the given creation time.
    pub fn from_draft(draft: &CustomerDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            name: draft.name.clone(),
            country: draft.country.clone(),
            gender: draft.gender.clone(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn records_without_a_usable_id_are_rejected() {
        for body in [json!({ "name": "Ann" }), json!({ "id": 1.5, "name": "Ann" })] {
            assert!(
                serde_json::from_value::<CustomerRecord>(body.clone()).is_err(),
                "body {body}"
            );
        }
    }

    #[test]
    fn decodes_sparse_records_and_keeps_unknown_fields() {
        let record: CustomerRecord = serde_json::from_value(json!({
            "id": 3,
            "name": "Ann",
            "gender": null,
            "avatar": "https://example.test/a.png"
        }))
        .expect("record");

        assert_eq!(record.id.as_str(), "3");
        assert_eq!(record.name.as_deref(), Some("Ann"));
        assert_eq!(record.gender, None);
        assert_eq!(record.country, None);
        assert_eq!(record.created_at, None);
        assert_eq!(
            record.extra.get("avatar"),
            Some(&json!("https://example.test/a.png"))
        );
    }

    #[test]
    fn update_body_replaces_editable_fields_only() {
        let record: CustomerRecord = serde_json::from_value(json!({
            "id": "9",
            "name": "Old",
            "gender": "male",
            "country": "Peru",
            "createdAt": "2025-01-01T00:00:00Z",
            "tier": 2
        }))
        .expect("record");
        let draft = CustomerDraft {
            name: "New".to_string(),
            gender: "female".to_string(),
            country: "Chile".to_string(),
        };

        let body = serde_json::to_value(record.with_draft(&draft)).expect("encode");

        assert_eq!(
            body,
            json!({
                "id": "9",
                "name": "New",
                "gender": "female",
                "country": "Chile",
                "createdAt": "2025-01-01T00:00:00Z",
                "tier": 2
            })
        );
    }

    #[test]
    fn create_body_uses_camel_case_and_millisecond_timestamp() {
        let draft = CustomerDraft {
            name: "Ann".to_string(),
            gender: "female".to_string(),
            country: "France".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).single().expect("time");

        let body = serde_json::to_value(NewCustomer::from_draft(&draft, now)).expect("encode");

        assert_eq!(
            body,
            json!({
                "name": "Ann",
                "country": "France",
                "gender": "female",
                "createdAt": "2025-03-05T10:00:00.000Z"
            })
        );
    }

    #[test]
    fn draft_completeness_requires_all_fields() {
        let mut draft = CustomerDraft {
            name: "Ann".to_string(),
            gender: "female".to_string(),
            country: String::new(),
        };
        assert!(!draft.is_complete());
        draft.country = "France".to_string();
        assert!(draft.is_complete());
    }
}
