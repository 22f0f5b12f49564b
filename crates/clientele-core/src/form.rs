//! Create/edit form state.
//!
//! The form owns a [`CustomerDraft`] and knows whether it edits an existing
//! record. Submitting turns the draft into a [`SaveRequest`]; while that
//! request is in flight the form refuses edits, resubmission, and closing.

use crate::error::FormError;
use crate::store::SaveRequest;
use chrono::{DateTime, Utc};
use clientele_protocol::{CustomerDraft, CustomerRecord, NewCustomer};

/// Gender values offered by the form.
pub const GENDER_OPTIONS: [&str; 3] = ["male", "female", "other"];

/// Whether the form creates a record or edits one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(CustomerRecord),
}

/// Editable form field, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Gender,
    Country,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Gender, FormField::Country];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Customer Name",
            FormField::Gender => "Gender",
            FormField::Country => "Country",
        }
    }

    /// Prompt shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Enter customer name",
            FormField::Gender => "Select gender",
            FormField::Country => "Select a country",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Gender,
            FormField::Gender => FormField::Country,
            FormField::Country => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Country,
            FormField::Gender => FormField::Name,
            FormField::Country => FormField::Gender,
        }
    }
}

/// An open create or edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerForm {
    mode: FormMode,
    draft: CustomerDraft,
    saving: bool,
}

impl CustomerForm {
    /// Blank form for a new record.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CustomerDraft::default(),
            saving: false,
        }
    }

    /// Form prefilled from `record`; absent fields start empty.
    pub fn edit(record: CustomerRecord) -> Self {
        let draft = CustomerDraft {
            name: record.name.clone().unwrap_or_default(),
            gender: record.gender.clone().unwrap_or_default(),
            country: record.country.clone().unwrap_or_default(),
        };
        Self {
            mode: FormMode::Edit(record),
            draft,
            saving: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_create(&self) -> bool {
        matches!(self.mode, FormMode::Create)
    }

    pub fn draft(&self) -> &CustomerDraft {
        &self.draft
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Gender => &self.draft.gender,
            FormField::Country => &self.draft.country,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.is_create() {
            "Add New Customer"
        } else {
            "Edit Customer"
        }
    }

    pub fn subtitle(&self) -> &'static str {
        if self.is_create() {
            "Create a new customer profile"
        } else {
            "Update customer information"
        }
    }

    /// Submit button label for the current state.
    pub fn submit_label(&self) -> &'static str {
        match (self.saving, self.is_create()) {
            (true, true) => "Creating...",
            (true, false) => "Saving...",
            (false, true) => "Create Customer",
            (false, false) => "Save Changes",
        }
    }

    /// Replace a field's value. Ignored while a save is in flight.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if self.saving {
            return false;
        }
        *self.slot(field) = value.into();
        true
    }

    /// Append a character to a field. Ignored while a save is in flight.
    pub fn push_char(&mut self, field: FormField, ch: char) -> bool {
        if self.saving {
            return false;
        }
        self.slot(field).push(ch);
        true
    }

    /// Remove the last character of a field. Ignored while a save is in flight.
    pub fn pop_char(&mut self, field: FormField) -> bool {
        if self.saving {
            return false;
        }
        self.slot(field).pop().is_some()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.saving && self.draft.is_complete()
    }

    /// Whether cancel/close is honoured.
    pub fn can_close(&self) -> bool {
        !self.saving
    }

    /// Lock the form and build the request to send.
    ///
    /// Creates are stamped with `now`; updates carry the full original
    /// record with the draft fields applied.
    pub fn begin_save(&mut self, now: DateTime<Utc>) -> Result<SaveRequest, FormError> {
        if self.saving {
            return Err(FormError::SaveInFlight);
        }
        if !self.draft.is_complete() {
            return Err(FormError::Incomplete);
        }
        let request = match &self.mode {
            FormMode::Create => SaveRequest::Create(NewCustomer::from_draft(&self.draft, now)),
            FormMode::Edit(original) => SaveRequest::Update {
                id: original.id.clone(),
                record: original.with_draft(&self.draft),
            },
        };
        self.saving = true;
        Ok(request)
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.draft.name,
            FormField::Gender => &mut self.draft.gender,
            FormField::Country => &mut self.draft.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).single().expect("valid time")
    }

    fn fill(form: &mut CustomerForm) {
        form.set(FormField::Name, "Cid");
        form.set(FormField::Gender, "other");
        form.set(FormField::Country, "Chile");
    }

    #[test]
    fn incomplete_form_cannot_submit() {
        let mut form = CustomerForm::create();
        form.set(FormField::Name, "Cid");
        assert!(!form.can_submit());
        assert_eq!(form.begin_save(now()), Err(FormError::Incomplete));
        assert!(!form.is_saving());
    }

    #[test]
    fn create_builds_stamped_body_and_locks() {
        let mut form = CustomerForm::create();
        fill(&mut form);
        let request = form.begin_save(now()).expect("request");
        assert_eq!(
            request,
            SaveRequest::Create(NewCustomer {
                name: "Cid".to_string(),
                country: "Chile".to_string(),
                gender: "other".to_string(),
                created_at: "2025-03-05T10:00:00.000Z".to_string(),
            })
        );
        assert!(form.is_saving());
        assert!(!form.can_close());
        assert!(!form.set(FormField::Name, "Changed"));
        assert!(!form.push_char(FormField::Name, 'x'));
        assert_eq!(form.value(FormField::Name), "Cid");
        assert_eq!(form.begin_save(now()), Err(FormError::SaveInFlight));
        assert_eq!(form.submit_label(), "Creating...");
    }

    #[test]
    fn edit_prefills_and_keeps_other_fields() {
        let mut original = CustomerRecord {
            name: Some("Ann".to_string()),
            gender: Some("female".to_string()),
            created_at: Some("2025-01-01T00:00:00Z".to_string()),
            ..CustomerRecord::new(7u64)
        };
        original
            .extra
            .insert("vip".to_string(), serde_json::Value::Bool(true));

        let mut form = CustomerForm::edit(original.clone());
        assert_eq!(form.title(), "Edit Customer");
        assert_eq!(form.value(FormField::Name), "Ann");
        assert_eq!(form.value(FormField::Country), "");

        form.set(FormField::Country, "France");
        let SaveRequest::Update { id, record } = form.begin_save(now()).expect("request") else {
            panic!("expected update");
        };
        assert_eq!(id, original.id);
        assert_eq!(record.country.as_deref(), Some("France"));
        assert_eq!(record.created_at, original.created_at);
        assert_eq!(record.extra, original.extra);
    }

    #[test]
    fn field_navigation_wraps() {
        assert_eq!(FormField::Country.next(), FormField::Name);
        assert_eq!(FormField::Name.previous(), FormField::Country);
        let mut form = CustomerForm::create();
        assert!(form.push_char(FormField::Name, 'A'));
        assert!(form.pop_char(FormField::Name));
        assert!(!form.pop_char(FormField::Name));
    }
}
