//! Screen state for the customer list.
//!
//! [`Screen`] is the single owner of the loaded records, the filter
//! criteria, and the open form. Network work happens elsewhere; its results
//! come back through [`Screen::finish_load`] and [`Screen::finish_save`],
//! each applied as one synchronous step.

use crate::empty_state::{EmptyAction, EmptyState, resolve_empty_state};
use crate::error::{FormError, StoreError};
use crate::filter::{FilterCriteria, FilterEngine, FilterField, unique_countries};
use crate::form::CustomerForm;
use crate::format::TimestampFormatter;
use crate::memo::Memo;
use crate::roster::Roster;
use crate::store::{SaveOutcome, SaveRequest, Snapshot};
use crate::table::{TableProjector, TableRow};
use chrono::{DateTime, Utc};
use clientele_protocol::{Country, CustomerRecord};
use log::{debug, error, info, warn};

/// Message shown when the initial load fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load data. Please check your connection.";

/// Message shown when a create or update fails.
pub fn save_failure_message(creating: bool) -> String {
    let verb = if creating { "create" } else { "update" };
    format!("Failed to {verb} customer. Please try again.")
}

/// Progress of the record/country load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready,
}

/// What the table area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<'a> {
    Rows(Vec<TableRow<'a>>),
    Empty(EmptyState),
}

/// Customer list screen.
#[derive(Debug)]
pub struct Screen {
    load: LoadState,
    roster: Roster,
    countries: Vec<Country>,
    criteria: FilterCriteria,
    form: Option<CustomerForm>,
    banner: Option<String>,
    engine: FilterEngine,
    projector: TableProjector,
    visible: Memo<(u64, FilterCriteria), Vec<usize>>,
    filter_countries: Memo<u64, Vec<String>>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(TimestampFormatter::default())
    }
}

impl Screen {
    /// Screen rendering timestamps with `formatter`, starting in
    /// [`LoadState::Loading`].
    pub fn new(formatter: TimestampFormatter) -> Self {
        Self {
            load: LoadState::Loading,
            roster: Roster::default(),
            countries: Vec::new(),
            criteria: FilterCriteria::default(),
            form: None,
            banner: None,
            engine: FilterEngine::new(formatter),
            projector: TableProjector::new(formatter),
            visible: Memo::default(),
            filter_countries: Memo::default(),
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Enter the loading state, as on start-up or retry.
    pub fn begin_load(&mut self) {
        debug!("Load started");
        self.load = LoadState::Loading;
    }

    /// Apply the outcome of a load.
    ///
    /// On failure the previous records are kept but hidden behind the
    /// failure state until a retry succeeds.
    pub fn finish_load(&mut self, result: Result<Snapshot, StoreError>) {
        match result {
            Ok(snapshot) => {
                info!(
                    "Load finished (records={}, countries={})",
                    snapshot.records.len(),
                    snapshot.countries.len()
                );
                self.roster.replace_all(snapshot.records);
                self.countries = snapshot.countries;
                self.load = LoadState::Ready;
            }
            Err(err) => {
                error!("Load failed (error={err})");
                self.load = LoadState::Failed(LOAD_FAILURE_MESSAGE.to_string());
            }
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Countries offered by the form.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Countries offered by the filter panel, derived from loaded records.
    pub fn filter_countries(&mut self) -> &[String] {
        let Self {
            roster,
            filter_countries,
            ..
        } = self;
        let roster = &*roster;
        filter_countries.get_or_compute(roster.revision(), || unique_countries(roster.records()))
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.criteria.set(field, value);
    }

    pub fn push_filter_char(&mut self, field: FilterField, ch: char) {
        self.criteria.slot(field).push(ch);
    }

    pub fn pop_filter_char(&mut self, field: FilterField) {
        self.criteria.slot(field).pop();
    }

    /// Clear one criterion, as from an active-filter tag.
    pub fn clear_filter(&mut self, field: FilterField) {
        debug!("Filter cleared (field={})", field.label());
        self.criteria.slot(field).clear();
    }

    pub fn clear_filters(&mut self) {
        info!("Filters cleared");
        self.criteria.clear();
    }

    /// Indices into [`Roster::records`] of the visible records.
    pub fn visible_indices(&mut self) -> &[usize] {
        let Self {
            roster,
            criteria,
            engine,
            visible,
            ..
        } = self;
        let roster = &*roster;
        let criteria = &*criteria;
        visible.get_or_compute((roster.revision(), criteria.clone()), || {
            engine.visible_indices(roster.records(), criteria)
        })
    }

    /// Number of records passing the current filters.
    pub fn visible_count(&mut self) -> usize {
        self.visible_indices().len()
    }

    pub fn total_count(&self) -> usize {
        self.roster.len()
    }

    /// Visible record at `position` in display order.
    pub fn visible_record(&mut self, position: usize) -> Option<&CustomerRecord> {
        let index = *self.visible_indices().get(position)?;
        self.roster.get(index)
    }

    /// Rows to render, or the empty state to show instead.
    pub fn body(&mut self) -> TableBody<'_> {
        let Self {
            roster,
            criteria,
            engine,
            projector,
            visible,
            ..
        } = self;
        let roster = &*roster;
        let criteria = &*criteria;
        let indices = visible.get_or_compute((roster.revision(), criteria.clone()), || {
            engine.visible_indices(roster.records(), criteria)
        });
        match resolve_empty_state(indices.len(), criteria) {
            Some(state) => TableBody::Empty(state),
            None => TableBody::Rows(
                projector.rows(indices.iter().filter_map(move |index| roster.get(*index))),
            ),
        }
    }

    /// Run the action offered by an empty state.
    pub fn trigger(&mut self, action: EmptyAction) {
        match action {
            EmptyAction::ClearFilters => self.clear_filters(),
            EmptyAction::AddFirstRecord => {
                self.open_create();
            }
        }
    }

    pub fn form(&self) -> Option<&CustomerForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut CustomerForm> {
        self.form.as_mut()
    }

    /// Open a blank create form. Refused while a save is in flight.
    pub fn open_create(&mut self) -> bool {
        self.open(CustomerForm::create())
    }

    /// Open an edit form for `record`. Refused while a save is in flight.
    pub fn open_edit(&mut self, record: CustomerRecord) -> bool {
        self.open(CustomerForm::edit(record))
    }

    fn open(&mut self, form: CustomerForm) -> bool {
        if self.is_saving() {
            return false;
        }
        self.form = Some(form);
        true
    }

    /// Close the form unless it is saving.
    pub fn close_form(&mut self) -> bool {
        if self.is_saving() {
            return false;
        }
        self.form = None;
        true
    }

    pub fn is_saving(&self) -> bool {
        self.form.as_ref().is_some_and(CustomerForm::is_saving)
    }

    /// Lock the open form and return the request to send.
    pub fn submit_form(&mut self, now: DateTime<Utc>) -> Result<SaveRequest, FormError> {
        let form = self.form.as_mut().ok_or(FormError::NotOpen)?;
        let request = form.begin_save(now)?;
        self.banner = None;
        debug!("Save submitted (create={})", request.is_create());
        Ok(request)
    }

    /// Apply the outcome of a save and close the form.
    ///
    /// Success prepends a created record or replaces an updated one in
    /// place. Failure leaves the records untouched and raises a banner.
    pub fn finish_save(&mut self, result: Result<SaveOutcome, StoreError>) {
        let creating = self.form.take().is_some_and(|form| form.is_create());
        match result {
            Ok(SaveOutcome::Created(record)) => {
                info!("Customer created (id={})", record.id);
                self.roster.prepend(record);
            }
            Ok(SaveOutcome::Updated { id, record }) => {
                if self.roster.replace_by_id(&id, record) {
                    info!("Customer updated (id={id})");
                } else {
                    warn!("Updated customer is no longer listed (id={id})");
                }
            }
            Err(err) => {
                error!("Save failed (create={creating}, error={err})");
                self.banner = Some(save_failure_message(creating));
            }
        }
    }

    /// Error banner from the last failed save.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ready_screen() -> Screen {
        let mut screen = Screen::default();
        let ann = CustomerRecord {
            name: Some("Ann".to_string()),
            country: Some("France".to_string()),
            ..CustomerRecord::new(1u64)
        };
        screen.finish_load(Ok(Snapshot {
            records: vec![ann],
            countries: Vec::new(),
        }));
        screen
    }

    #[test]
    fn starts_loading_and_becomes_ready() {
        assert_eq!(Screen::default().load_state(), &LoadState::Loading);
        let mut screen = ready_screen();
        assert_eq!(screen.load_state(), &LoadState::Ready);
        assert_eq!(screen.visible_count(), 1);
        assert_eq!(screen.filter_countries(), ["France".to_string()]);
    }

    #[test]
    fn failed_load_reports_fixed_message() {
        let mut screen = Screen::default();
        screen.finish_load(Err(StoreError::Timeout));
        assert_eq!(
            screen.load_state(),
            &LoadState::Failed(LOAD_FAILURE_MESSAGE.to_string())
        );
        screen.begin_load();
        assert_eq!(screen.load_state(), &LoadState::Loading);
    }

    #[test]
    fn visible_view_follows_criteria_changes() {
        let mut screen = ready_screen();
        screen.push_filter_char(FilterField::Name, 'z');
        assert_eq!(screen.body(), TableBody::Empty(EmptyState::NoMatches));
        screen.pop_filter_char(FilterField::Name);
        assert_eq!(screen.visible_count(), 1);
        assert_eq!(
            screen.visible_record(0).and_then(|record| record.name.as_deref()),
            Some("Ann")
        );
        assert!(screen.visible_record(1).is_none());
    }

    #[test]
    fn save_failure_messages_name_the_operation() {
        assert_eq!(
            save_failure_message(true),
            "Failed to create customer. Please try again."
        );
        assert_eq!(
            save_failure_message(false),
            "Failed to update customer. Please try again."
        );
    }

    #[test]
    fn submit_without_form_is_refused() {
        let mut screen = ready_screen();
        assert_eq!(
            screen.submit_form(Utc::now()).unwrap_err(),
            FormError::NotOpen
        );
    }
}
