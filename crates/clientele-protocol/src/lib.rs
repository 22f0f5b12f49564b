//! Wire types for customer records, countries, and form drafts.

mod country;
mod record;

pub use country::Country;
pub use record::{CustomerDraft, CustomerRecord, NewCustomer};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Unique identifier for a customer record.
pub type RecordId = OpaqueId;
/// Unique identifier for a country entry.
pub type CountryId = OpaqueId;

/// Store-assigned identifier, compared by value only.
///
/// Backends hand ids out either as JSON strings or as integers; both decode
/// into the same textual form and always encode back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpaqueId(String);

impl OpaqueId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OpaqueId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OpaqueId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for OpaqueId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for OpaqueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OpaqueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = OpaqueId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer identifier")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<OpaqueId, E> {
                Ok(OpaqueId::new(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<OpaqueId, E> {
                Ok(OpaqueId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<OpaqueId, E> {
                Ok(OpaqueId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Decode an optional text field leniently.
///
/// Strings pass through, numbers and booleans are rendered as text, and
/// `null` or structured values decode as absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn numeric_and_text_ids_decode_to_the_same_value() {
        let numeric: OpaqueId = serde_json::from_value(json!(7)).expect("numeric id");
        let text: OpaqueId = serde_json::from_value(json!("7")).expect("text id");
        assert_eq!(numeric, text);
        assert_eq!(serde_json::to_value(&numeric).expect("encode"), json!("7"));
    }

    #[test]
    fn rejects_structured_ids() {
        let err = serde_json::from_value::<OpaqueId>(json!({ "id": 1 })).unwrap_err();
        assert!(err.to_string().contains("identifier"));
    }
}
