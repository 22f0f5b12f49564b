//! Client-side record filtering.
//!
//! Every criterion is independent and optional; a record is visible when it
//! satisfies all non-empty criteria. Name, country, and date use
//! case-insensitive substring matching, gender uses case-insensitive exact
//! matching so that `male` never matches `female`.

use crate::format::TimestampFormatter;
use clientele_protocol::CustomerRecord;
use std::collections::HashSet;

/// Filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Name,
    Country,
    Gender,
    Date,
}

impl FilterField {
    /// All fields in display order.
    pub const ALL: [FilterField; 4] = [
        FilterField::Name,
        FilterField::Gender,
        FilterField::Country,
        FilterField::Date,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Name => "Name",
            FilterField::Country => "Country",
            FilterField::Gender => "Gender",
            FilterField::Date => "Date",
        }
    }
}

/// Current query per field; an empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub name: String,
    pub country: String,
    pub gender: String,
    pub date: String,
}

impl FilterCriteria {
    /// Query for a field.
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Name => &self.name,
            FilterField::Country => &self.country,
            FilterField::Gender => &self.gender,
            FilterField::Date => &self.date,
        }
    }

    /// Replace the query for a field.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Mutable access to a field's query, for incremental text editing.
    pub fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Name => &mut self.name,
            FilterField::Country => &mut self.country,
            FilterField::Gender => &mut self.gender,
            FilterField::Date => &mut self.date,
        }
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any field constrains the result.
    pub fn is_active(&self) -> bool {
        FilterField::ALL
            .iter()
            .any(|field| !self.get(*field).is_empty())
    }

    /// Non-empty fields with their queries, in display order.
    pub fn active(&self) -> Vec<(FilterField, &str)> {
        FilterField::ALL
            .iter()
            .map(|field| (*field, self.get(*field)))
            .filter(|(_, query)| !query.is_empty())
            .collect()
    }
}

/// Criteria lower-cased once per evaluation pass.
struct Needles {
    name: Option<String>,
    country: Option<String>,
    gender: Option<String>,
    date: Option<String>,
}

impl Needles {
    fn new(criteria: &FilterCriteria) -> Self {
        let lower = |query: &str| (!query.is_empty()).then(|| query.to_lowercase());
        Self {
            name: lower(&criteria.name),
            country: lower(&criteria.country),
            gender: lower(&criteria.gender),
            date: lower(&criteria.date),
        }
    }
}

/// Evaluates filter criteria against records.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine {
    formatter: TimestampFormatter,
}

impl FilterEngine {
    /// Engine whose date criterion matches text rendered by `formatter`.
    pub fn new(formatter: TimestampFormatter) -> Self {
        Self { formatter }
    }

    /// Whether `record` satisfies every non-empty criterion.
    pub fn matches(&self, record: &CustomerRecord, criteria: &FilterCriteria) -> bool {
        self.matches_needles(record, &Needles::new(criteria))
    }

    /// Visible records, in collection order.
    pub fn apply<'a>(
        &self,
        records: &'a [CustomerRecord],
        criteria: &FilterCriteria,
    ) -> Vec<&'a CustomerRecord> {
        let needles = Needles::new(criteria);
        records
            .iter()
            .filter(|record| self.matches_needles(record, &needles))
            .collect()
    }

    /// Positions of visible records within `records`.
    pub fn visible_indices(&self, records: &[CustomerRecord], criteria: &FilterCriteria) -> Vec<usize> {
        let needles = Needles::new(criteria);
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches_needles(record, &needles))
            .map(|(index, _)| index)
            .collect()
    }

    fn matches_needles(&self, record: &CustomerRecord, needles: &Needles) -> bool {
        contains(record.name.as_deref(), needles.name.as_deref())
            && contains(record.country.as_deref(), needles.country.as_deref())
            && equals(record.gender.as_deref(), needles.gender.as_deref())
            && match needles.date.as_deref() {
                None => true,
                Some(needle) => self
                    .formatter
                    .format_date(record.created_at.as_deref())
                    .to_lowercase()
                    .contains(needle),
            }
    }
}

fn contains(value: Option<&str>, needle: Option<&str>) -> bool {
    match (needle, value) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(needle), Some(value)) => !value.is_empty() && value.to_lowercase().contains(needle),
    }
}

fn equals(value: Option<&str>, needle: Option<&str>) -> bool {
    match (needle, value) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(needle), Some(value)) => value.to_lowercase() == needle,
    }
}

/// Distinct non-empty countries across all records, in first-seen order.
pub fn unique_countries(records: &[CustomerRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| record.country.as_deref())
        .filter(|country| !country.is_empty() && seen.insert(*country))
        .map(str::to_string)
        .collect()
}
