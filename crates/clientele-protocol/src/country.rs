//! Country entries offered by the form's country picker.

use crate::{CountryId, lenient_text};
use serde::{Deserialize, Deserializer, Serialize};

/// Country option; `name` doubles as the value stored on a record.
///
/// `id` must be a string or an integer. A missing or non-text name decodes
/// as an empty string so one odd entry does not fail the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}
