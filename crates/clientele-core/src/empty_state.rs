//! Fallback content for an empty table body.

use crate::filter::FilterCriteria;

/// Action offered by an empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyAction {
    /// Reset every filter criterion.
    ClearFilters,
    /// Open the create form.
    AddFirstRecord,
}

impl EmptyAction {
    pub fn label(self) -> &'static str {
        match self {
            EmptyAction::ClearFilters => "Clear Filters",
            EmptyAction::AddFirstRecord => "Add First Customer",
        }
    }
}

/// Which empty state to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Filters are active and hide every record.
    NoMatches,
    /// There is nothing to show at all.
    NoRecords,
}

impl EmptyState {
    pub fn title(self) -> &'static str {
        match self {
            EmptyState::NoMatches => "No matching records found",
            EmptyState::NoRecords => "No records found",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            EmptyState::NoMatches => "Try adjusting your filters or clear them to see all records",
            EmptyState::NoRecords => "Get started by adding your first customer record",
        }
    }

    pub fn action(self) -> EmptyAction {
        match self {
            EmptyState::NoMatches => EmptyAction::ClearFilters,
            EmptyState::NoRecords => EmptyAction::AddFirstRecord,
        }
    }
}

/// Empty state for a table showing `visible_len` rows, or `None` when rows
/// should be rendered.
pub fn resolve_empty_state(visible_len: usize, criteria: &FilterCriteria) -> Option<EmptyState> {
    if visible_len > 0 {
        return None;
    }
    if criteria.is_active() {
        Some(EmptyState::NoMatches)
    } else {
        Some(EmptyState::NoRecords)
    }
}
