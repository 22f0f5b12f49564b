//! Library entry point for the Clientele TUI.
//!
//! Provides a reusable [`run`] function that launches the Ratatui terminal UI
//! against any record store and country source.

mod app;
mod event;
mod ui;

use anyhow::anyhow;
use app::{Action, App};
use chrono::Utc;
use clientele_config::DisplayTimezone;
use clientele_core::{
    CountrySource, RecordStore, SaveRequest, Screen, TimestampFormatter, load_snapshot,
};
use crossterm::event::Event as CrosstermEvent;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use log::{debug, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Configuration for a TUI session.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuiConfig {
    /// Zone used to render record timestamps.
    pub timezone: DisplayTimezone,
}

/// Launch the TUI against `store`.
///
/// The caller is responsible for initializing logging before calling `run`.
///
/// # Errors
/// Returns an error if terminal setup or the event loop fails.
pub async fn run<S>(store: Arc<S>, config: TuiConfig) -> anyhow::Result<()>
where
    S: RecordStore + CountrySource + 'static,
{
    let screen = Screen::new(TimestampFormatter::new(config.timezone));
    let mut app = App::new(screen);

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone());

    if let Action::Load = app.request_load() {
        spawn_load(store.clone(), tx.clone());
    }

    let result: anyhow::Result<()> = loop {
        if let Err(err) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(err.into());
        }
        let Some(event) = rx.recv().await else {
            break Err(anyhow!("event channel closed unexpectedly"));
        };
        if handle_app_event(event, &store, &mut app, tx.clone()) {
            break Ok(());
        }
    };

    restore_terminal(&mut terminal)?;
    info!("exiting TUI");
    result
}

/// Dispatch a UI event and return true when the app should exit.
fn handle_app_event<S>(
    event: AppEvent,
    store: &Arc<S>,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
) -> bool
where
    S: RecordStore + CountrySource + 'static,
{
    match event {
        AppEvent::Input(key) => match app.handle_key(key, Utc::now()) {
            Action::None => false,
            Action::Quit => true,
            Action::Load => {
                spawn_load(store.clone(), sender);
                false
            }
            Action::Save(request) => {
                spawn_save(store.clone(), request, sender);
                false
            }
        },
        AppEvent::Tick => {
            app.on_tick();
            false
        }
        AppEvent::Loaded(result) => {
            app.apply_loaded(result);
            false
        }
        AppEvent::Saved(result) => {
            app.apply_saved(result);
            false
        }
    }
}

/// Spawn a task fetching records and countries concurrently.
fn spawn_load<S>(store: Arc<S>, sender: mpsc::Sender<AppEvent>)
where
    S: RecordStore + CountrySource + 'static,
{
    debug!("dispatching load");
    tokio::spawn(async move {
        let result = load_snapshot(&*store, &*store).await;
        let _ = sender.send(AppEvent::Loaded(result)).await;
    });
}

/// Spawn a task sending a create or update.
fn spawn_save<S>(store: Arc<S>, request: SaveRequest, sender: mpsc::Sender<AppEvent>)
where
    S: RecordStore + CountrySource + 'static,
{
    debug!("dispatching save (create={})", request.is_create());
    tokio::spawn(async move {
        let result = request.send(&*store).await;
        let _ = sender.send(AppEvent::Saved(result)).await;
    });
}

/// Spawn a task to poll for input events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    if let CrosstermEvent::Key(key) = event {
                        let _ = sender.send(AppEvent::Input(key)).await;
                    }
                }
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            let _ = sender.send(AppEvent::Tick).await;
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_core::{LoadState, StoreError};
    use clientele_test_utils::{StubStore, sample_countries, sample_records};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[tokio::test]
    async fn load_event_round_trip_populates_screen() {
        let store = Arc::new(StubStore::with_data(sample_records(), sample_countries()));
        let (tx, mut rx) = mpsc::channel(8);
        let mut app = App::new(Screen::default());

        assert!(matches!(app.request_load(), Action::Load));
        spawn_load(store.clone(), tx.clone());
        let event = rx.recv().await.expect("event");
        assert!(!handle_app_event(event, &store, &mut app, tx));
        assert_eq!(app.screen.load_state(), &LoadState::Ready);
        assert_eq!(app.screen.total_count(), 4);
    }

    #[tokio::test]
    async fn quit_key_stops_the_loop() {
        let store = Arc::new(StubStore::new());
        let (tx, _rx) = mpsc::channel(8);
        let mut app = App::new(Screen::default());
        let quit = AppEvent::Input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(handle_app_event(quit, &store, &mut app, tx));
    }

    #[tokio::test]
    async fn failed_save_surfaces_banner() {
        let store = Arc::new(
            StubStore::with_data(sample_records(), sample_countries())
                .fail_saves(StoreError::Timeout),
        );
        let (tx, mut rx) = mpsc::channel(8);
        let mut app = App::new(Screen::default());
        app.apply_loaded(Ok(clientele_core::Snapshot {
            records: sample_records(),
            countries: sample_countries(),
        }));

        let Some(record) = app.screen.visible_record(0).cloned() else {
            panic!("expected a record");
        };
        app.screen.open_edit(record);
        let request = app.screen.submit_form(Utc::now()).expect("request");
        spawn_save(store.clone(), request, tx.clone());

        let event = rx.recv().await.expect("event");
        handle_app_event(event, &store, &mut app, tx);
        assert_eq!(
            app.screen.banner(),
            Some("Failed to update customer. Please try again.")
        );
        assert!(app.screen.form().is_none());
    }
}
