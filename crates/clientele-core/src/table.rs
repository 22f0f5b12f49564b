//! Projection of visible records into table rows.

use crate::format::TimestampFormatter;
use clientele_protocol::CustomerRecord;

/// Text shown for an absent name, gender, or country.
pub const UNKNOWN: &str = "Unknown";

/// Column identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Name,
    Gender,
    Created,
    Country,
    Actions,
}

/// Column header and preferred width.
///
/// Widths are layout hints; renderers may scale them to the space they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: ColumnKey,
    pub header: &'static str,
    pub width: u16,
}

/// Table columns in display order.
pub const COLUMNS: [Column; 5] = [
    Column {
        key: ColumnKey::Name,
        header: "NAME",
        width: 220,
    },
    Column {
        key: ColumnKey::Gender,
        header: "GENDER",
        width: 130,
    },
    Column {
        key: ColumnKey::Created,
        header: "DATE",
        width: 160,
    },
    Column {
        key: ColumnKey::Country,
        header: "COUNTRY",
        width: 180,
    },
    Column {
        key: ColumnKey::Actions,
        header: "ACTIONS",
        width: 120,
    },
];

/// Styling bucket for a gender value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderClass {
    Male,
    Female,
    Other,
}

impl GenderClass {
    /// Classify a raw gender value; anything but an exact
    /// (case-insensitive) `male` or `female` is [`GenderClass::Other`].
    pub fn classify(gender: Option<&str>) -> Self {
        match gender.map(str::to_lowercase).as_deref() {
            Some("male") => GenderClass::Male,
            Some("female") => GenderClass::Female,
            _ => GenderClass::Other,
        }
    }

    /// Style class name.
    pub fn as_str(self) -> &'static str {
        match self {
            GenderClass::Male => "male",
            GenderClass::Female => "female",
            GenderClass::Other => "other",
        }
    }
}

/// Gender cell: styling class plus the raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderTag {
    pub class: GenderClass,
    pub text: String,
}

/// Created cell: date line and time line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCell {
    pub date: String,
    pub time: String,
}

/// One projected row.
///
/// `record` is the untouched source record; the edit action hands it over
/// as is rather than rebuilding it from the display cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    pub name: String,
    pub gender: GenderTag,
    pub created: DateCell,
    pub country: String,
    pub record: &'a CustomerRecord,
}

impl TableRow<'_> {
    /// Source record for the edit action.
    pub fn edit_target(&self) -> &CustomerRecord {
        self.record
    }
}

/// Builds [`TableRow`]s with a fixed timestamp formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableProjector {
    formatter: TimestampFormatter,
}

impl TableProjector {
    pub fn new(formatter: TimestampFormatter) -> Self {
        Self { formatter }
    }

    /// Project a single record.
    pub fn row<'a>(&self, record: &'a CustomerRecord) -> TableRow<'a> {
        TableRow {
            name: or_unknown(record.name.as_deref()),
            gender: GenderTag {
                class: GenderClass::classify(record.gender.as_deref()),
                text: or_unknown(record.gender.as_deref()),
            },
            created: DateCell {
                date: self.formatter.format_date(record.created_at.as_deref()),
                time: self.formatter.format_time(record.created_at.as_deref()),
            },
            country: or_unknown(record.country.as_deref()),
            record,
        }
    }

    /// Project records in order.
    pub fn rows<'a, I>(&self, records: I) -> Vec<TableRow<'a>>
    where
        I: IntoIterator<Item = &'a CustomerRecord>,
    {
        records.into_iter().map(|record| self.row(record)).collect()
    }
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FALLBACK_DATE, FALLBACK_TIME};
    use pretty_assertions::assert_eq;

    #[test]
    fn projects_complete_record() {
        let record = CustomerRecord {
            name: Some("Ann".to_string()),
            gender: Some("Female".to_string()),
            country: Some("France".to_string()),
            created_at: Some("2025-03-05T15:07:00Z".to_string()),
            ..CustomerRecord::new(1u64)
        };
        let row = TableProjector::default().row(&record);
        assert_eq!(row.name, "Ann");
        assert_eq!(
            row.gender,
            GenderTag {
                class: GenderClass::Female,
                text: "Female".to_string(),
            }
        );
        assert_eq!(
            row.created,
            DateCell {
                date: "Mar 5, 2025".to_string(),
                time: "03:07 PM".to_string(),
            }
        );
        assert_eq!(row.country, "France");
        assert!(std::ptr::eq(row.edit_target(), &record));
    }

    #[test]
    fn sparse_record_uses_fallbacks() {
        let record = CustomerRecord {
            name: Some(String::new()),
            ..CustomerRecord::new("abc")
        };
        let row = TableProjector::default().row(&record);
        assert_eq!(row.name, UNKNOWN);
        assert_eq!(row.country, UNKNOWN);
        assert_eq!(row.gender.text, UNKNOWN);
        assert_eq!(row.gender.class, GenderClass::Other);
        assert_eq!(row.created.date, FALLBACK_DATE);
        assert_eq!(row.created.time, FALLBACK_TIME);
    }

    #[test]
    fn gender_class_requires_exact_match() {
        assert_eq!(GenderClass::classify(Some("MALE")), GenderClass::Male);
        assert_eq!(GenderClass::classify(Some("malee")), GenderClass::Other);
        assert_eq!(GenderClass::classify(Some("other")), GenderClass::Other);
        assert_eq!(GenderClass::classify(None), GenderClass::Other);
        assert_eq!(GenderClass::Female.as_str(), "female");
    }

    #[test]
    fn columns_keep_their_order_and_widths() {
        let widths: Vec<u16> = COLUMNS.iter().map(|column| column.width).collect();
        assert_eq!(widths, vec![220, 130, 160, 180, 120]);
        assert_eq!(COLUMNS[4].key, ColumnKey::Actions);
    }
}
