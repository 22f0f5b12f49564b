//! Application state and key handling for the Clientele TUI.

use chrono::{DateTime, Utc};
use clientele_core::{
    FilterField, FormField, GENDER_OPTIONS, LoadState, SaveOutcome, SaveRequest, Screen,
    Snapshot, StoreError, TableBody,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

/// Gender values offered by the filter panel; empty means all.
pub const GENDER_FILTER_OPTIONS: [&str; 3] = ["", "Male", "Female"];

/// Which part of the list screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Row selection and list shortcuts.
    Table,
    /// Filter panel inputs.
    Filters,
}

/// Side effect requested by a key press.
#[derive(Debug, PartialEq)]
pub enum Action {
    /// Nothing to do beyond redrawing.
    None,
    /// Exit the application.
    Quit,
    /// Fetch records and countries.
    Load,
    /// Send a create or update.
    Save(SaveRequest),
}

/// Top-level application state for the TUI.
pub struct App {
    /// Records, filters, and form.
    pub screen: Screen,
    /// Whether the filter panel is shown.
    pub show_filters: bool,
    /// Current key focus outside the form.
    pub focus: Focus,
    /// Filter input receiving keys while the panel is focused.
    pub filter_field: FilterField,
    /// Form input receiving keys while the form is open.
    pub form_field: FormField,
    /// Selected position within the visible rows.
    pub selected: usize,
    /// Status line text.
    pub status: String,
    /// Animation frame for the loading indicator.
    pub spinner: usize,
}

impl App {
    /// Create application state around a screen.
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            show_filters: false,
            focus: Focus::Table,
            filter_field: FilterField::Name,
            form_field: FormField::Name,
            selected: 0,
            status: "loading".to_string(),
            spinner: 0,
        }
    }

    /// Advance animations.
    pub fn on_tick(&mut self) {
        self.spinner = self.spinner.wrapping_add(1);
    }

    /// Enter the loading state and ask for a fetch.
    pub fn request_load(&mut self) -> Action {
        self.screen.begin_load();
        self.status = "loading".to_string();
        Action::Load
    }

    /// Apply a finished load.
    pub fn apply_loaded(&mut self, result: Result<Snapshot, StoreError>) {
        self.screen.finish_load(result);
        self.status = match self.screen.load_state() {
            LoadState::Ready => "ready".to_string(),
            LoadState::Failed(_) => "load failed".to_string(),
            LoadState::Loading => "loading".to_string(),
        };
        self.clamp_selection();
    }

    /// Apply a finished save.
    pub fn apply_saved(&mut self, result: Result<SaveOutcome, StoreError>) {
        let created = matches!(result, Ok(SaveOutcome::Created(_)));
        let succeeded = result.is_ok();
        self.screen.finish_save(result);
        self.status = if succeeded { "saved" } else { "save failed" }.to_string();
        if created {
            self.selected = 0;
        }
        self.clamp_selection();
    }

    /// Dispatch a key press and return the effect to run.
    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match self.screen.load_state() {
            LoadState::Loading => self.handle_loading_key(key),
            LoadState::Failed(_) => self.handle_failed_key(key),
            LoadState::Ready if self.screen.form().is_some() => self.handle_form_key(key, now),
            LoadState::Ready => match self.focus {
                Focus::Filters => self.handle_filter_key(key),
                Focus::Table => self.handle_table_key(key),
            },
        }
    }

    fn handle_loading_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }

    fn handle_failed_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Enter | KeyCode::Char('r') => self.request_load(),
            _ => Action::None,
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('r') => return self.request_load(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.screen.visible_count() {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.screen.visible_count().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('e') => self.activate_selection(),
            KeyCode::Char('n') | KeyCode::Char('a') => self.open_create(),
            KeyCode::Char('f') => {
                self.show_filters = !self.show_filters;
                self.focus = if self.show_filters {
                    Focus::Filters
                } else {
                    Focus::Table
                };
            }
            KeyCode::Char('/') => {
                self.show_filters = true;
                self.focus = Focus::Filters;
            }
            KeyCode::Char('c') => self.clear_filters(),
            KeyCode::Char(digit @ '1'..='4') => self.clear_filter_tag(digit),
            KeyCode::Char('d') => self.screen.dismiss_banner(),
            _ => {}
        }
        Action::None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('x') {
            self.clear_filters();
            return Action::None;
        }
        let field = self.filter_field;
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::Table,
            KeyCode::Tab | KeyCode::Down => self.filter_field = next_filter_field(field),
            KeyCode::BackTab | KeyCode::Up => self.filter_field = previous_filter_field(field),
            KeyCode::Delete => self.screen.clear_filter(field),
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match field {
                    FilterField::Gender => {
                        let current = self.screen.criteria().get(field);
                        let value = cycle(&GENDER_FILTER_OPTIONS[..], current, forward);
                        self.screen.set_filter(field, value);
                    }
                    FilterField::Country => {
                        let mut options = vec![String::new()];
                        options.extend(self.screen.filter_countries().iter().cloned());
                        let current = self.screen.criteria().get(field);
                        let value = cycle(options.as_slice(), current, forward);
                        self.screen.set_filter(field, value);
                    }
                    FilterField::Name | FilterField::Date => {}
                }
            }
            KeyCode::Backspace if is_text_filter(field) => self.screen.pop_filter_char(field),
            KeyCode::Char(ch) if is_text_filter(field) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.screen.push_filter_char(field, ch);
                }
            }
            _ => {}
        }
        self.clamp_selection();
        Action::None
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: DateTime<Utc>) -> Action {
        let field = self.form_field;
        match key.code {
            KeyCode::Esc => {
                if !self.screen.close_form() {
                    debug!("Close ignored while saving");
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form_field = field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_field = field.previous(),
            KeyCode::Enter => return self.submit(now),
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                let options: Vec<String> = match field {
                    FormField::Name => return Action::None,
                    FormField::Gender => GENDER_OPTIONS.iter().map(|g| g.to_string()).collect(),
                    FormField::Country => self
                        .screen
                        .countries()
                        .iter()
                        .map(|country| country.name.clone())
                        .collect(),
                };
                if let Some(form) = self.screen.form_mut() {
                    let value = cycle(options.as_slice(), form.value(field), forward);
                    form.set(field, value);
                }
            }
            KeyCode::Backspace if field == FormField::Name => {
                if let Some(form) = self.screen.form_mut() {
                    form.pop_char(field);
                }
            }
            KeyCode::Char(ch) if field == FormField::Name => {
                if let Some(form) = self.screen.form_mut() {
                    form.push_char(field, ch);
                }
            }
            _ => {}
        }
        Action::None
    }

    fn submit(&mut self, now: DateTime<Utc>) -> Action {
        match self.screen.submit_form(now) {
            Ok(request) => {
                self.status = "saving".to_string();
                Action::Save(request)
            }
            Err(err) => {
                self.status = err.to_string();
                Action::None
            }
        }
    }

    fn activate_selection(&mut self) {
        let empty_action = match self.screen.body() {
            TableBody::Empty(state) => Some(state.action()),
            TableBody::Rows(_) => None,
        };
        if let Some(action) = empty_action {
            self.screen.trigger(action);
            self.form_field = FormField::Name;
            self.clamp_selection();
            return;
        }
        if let Some(record) = self.screen.visible_record(self.selected).cloned() {
            debug!("Editing customer (id={})", record.id);
            self.screen.open_edit(record);
            self.form_field = FormField::Name;
        }
    }

    fn open_create(&mut self) {
        if self.screen.open_create() {
            self.form_field = FormField::Name;
        }
    }

    fn clear_filters(&mut self) {
        self.screen.clear_filters();
        self.clamp_selection();
    }

    /// Clear the n-th active filter tag, counting from 1.
    fn clear_filter_tag(&mut self, digit: char) {
        let Some(position) = digit.to_digit(10).and_then(|n| (n as usize).checked_sub(1)) else {
            return;
        };
        let field = self
            .screen
            .criteria()
            .active()
            .get(position)
            .map(|(field, _)| *field);
        if let Some(field) = field {
            self.screen.clear_filter(field);
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        let visible = self.screen.visible_count();
        self.selected = self.selected.min(visible.saturating_sub(1));
    }
}

fn is_text_filter(field: FilterField) -> bool {
    matches!(field, FilterField::Name | FilterField::Date)
}

fn next_filter_field(field: FilterField) -> FilterField {
    let index = FilterField::ALL.iter().position(|f| *f == field).unwrap_or(0);
    FilterField::ALL[(index + 1) % FilterField::ALL.len()]
}

fn previous_filter_field(field: FilterField) -> FilterField {
    let len = FilterField::ALL.len();
    let index = FilterField::ALL.iter().position(|f| *f == field).unwrap_or(0);
    FilterField::ALL[(index + len - 1) % len]
}

/// Step to the neighbouring option, wrapping at both ends. A value that is
/// not among the options starts from the first (or last) one.
fn cycle<S: AsRef<str>>(options: &[S], current: &str, forward: bool) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let len = options.len();
    let next = match options.iter().position(|option| option.as_ref() == current) {
        Some(index) if forward => (index + 1) % len,
        Some(index) => (index + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options[next].as_ref().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_core::FormError;
    use clientele_protocol::{Country, CustomerRecord};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn record(id: u64, name: &str, gender: &str, country: &str) -> CustomerRecord {
        CustomerRecord {
            name: Some(name.to_string()),
            gender: Some(gender.to_string()),
            country: Some(country.to_string()),
            ..CustomerRecord::new(id)
        }
    }

    fn ready_app() -> App {
        let mut app = App::new(Screen::default());
        app.apply_loaded(Ok(Snapshot {
            records: vec![
                record(1, "Ann", "female", "France"),
                record(2, "Bob", "male", "Peru"),
            ],
            countries: vec![
                Country {
                    id: 1u64.into(),
                    name: "France".to_string(),
                },
                Country {
                    id: 2u64.into(),
                    name: "Peru".to_string(),
                },
            ],
        }));
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        app.handle_key(key(code), Utc::now())
    }

    #[test]
    fn failed_load_retries_on_enter() {
        let mut app = App::new(Screen::default());
        app.apply_loaded(Err(StoreError::Timeout));
        assert_eq!(app.status, "load failed");
        assert_eq!(press(&mut app, KeyCode::Enter), Action::Load);
        assert_eq!(app.screen.load_state(), &LoadState::Loading);
    }

    #[test]
    fn selection_moves_within_visible_rows() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn filter_typing_narrows_and_clamps_selection() {
        let mut app = ready_app();
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.focus, Focus::Filters);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen.criteria().name, "an");
        assert_eq!(app.screen.visible_count(), 1);
        assert_eq!(app.selected, 0);

        app.handle_key(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
            Utc::now(),
        );
        assert!(!app.screen.criteria().is_active());
    }

    #[test]
    fn gender_filter_cycles_through_options() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.filter_field, FilterField::Gender);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.screen.criteria().gender, "Male");
        assert_eq!(app.screen.visible_count(), 1);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.screen.criteria().gender, "");
    }

    #[test]
    fn digit_clears_matching_filter_tag() {
        let mut app = ready_app();
        app.screen.set_filter(FilterField::Name, "zzz");
        app.screen.set_filter(FilterField::Country, "Peru");
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen.criteria().name, "");
        assert_eq!(app.screen.criteria().country, "Peru");
    }

    #[test]
    fn create_form_collects_fields_and_saves() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('n'));
        for ch in "Cid".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        assert!(matches!(
            press(&mut app, KeyCode::Enter),
            Action::None
        ));
        assert_eq!(app.status, FormError::Incomplete.to_string());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        let form = app.screen.form().expect("form");
        assert_eq!(form.value(FormField::Gender), "male");
        assert_eq!(form.value(FormField::Country), "France");

        let Action::Save(request) = press(&mut app, KeyCode::Enter) else {
            panic!("expected save");
        };
        assert!(request.is_create());
        assert_eq!(press(&mut app, KeyCode::Esc), Action::None);
        assert!(app.screen.form().is_some());

        let created = record(3, "Cid", "male", "France");
        app.apply_saved(Ok(SaveOutcome::Created(created)));
        assert!(app.screen.form().is_none());
        assert_eq!(app.screen.total_count(), 3);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn enter_edits_selected_row() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let form = app.screen.form().expect("form");
        assert_eq!(form.value(FormField::Name), "Bob");
        press(&mut app, KeyCode::Esc);
        assert!(app.screen.form().is_none());
    }

    #[test]
    fn enter_on_empty_state_runs_its_action() {
        let mut app = ready_app();
        app.screen.set_filter(FilterField::Name, "nobody");
        press(&mut app, KeyCode::Enter);
        assert!(!app.screen.criteria().is_active());
        assert!(app.screen.form().is_none());

        let mut empty = App::new(Screen::default());
        empty.apply_loaded(Ok(Snapshot::default()));
        press(&mut empty, KeyCode::Enter);
        assert!(empty.screen.form().is_some_and(|form| form.is_create()));
    }

    #[test]
    fn cycle_wraps_and_handles_unknown_values() {
        let options = ["a", "b", "c"];
        assert_eq!(cycle(&options[..], "c", true), "a");
        assert_eq!(cycle(&options[..], "a", false), "c");
        assert_eq!(cycle(&options[..], "zzz", true), "a");
        assert_eq!(cycle(&options[..], "zzz", false), "c");
        let none: [&str; 0] = [];
        assert_eq!(cycle(&none[..], "keep", true), "keep");
    }
}
