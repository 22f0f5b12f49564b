//! TUI event types for input and store round-trips.

use clientele_core::{SaveOutcome, Snapshot, StoreError};
use crossterm::event::KeyEvent;

/// Application event emitted by input handlers or background tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// Records and countries finished loading.
    Loaded(Result<Snapshot, StoreError>),
    /// A create or update finished.
    Saved(Result<SaveOutcome, StoreError>),
}
