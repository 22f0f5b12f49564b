//! Record filtering, table projection, and screen state for Clientele.
//!
//! Everything here is synchronous except the two store round-trips (initial
//! load and save), which are expressed against the [`RecordStore`] and
//! [`CountrySource`] traits so any transport can back them.

pub mod empty_state;
pub mod error;
pub mod filter;
pub mod form;
pub mod format;
mod memo;
pub mod roster;
pub mod screen;
pub mod store;
pub mod table;

pub use empty_state::{EmptyAction, EmptyState, resolve_empty_state};
pub use error::{FormError, StoreError};
pub use filter::{FilterCriteria, FilterEngine, FilterField, unique_countries};
pub use form::{CustomerForm, FormField, FormMode, GENDER_OPTIONS};
pub use format::{FALLBACK_DATE, FALLBACK_TIME, TimestampFormatter, format_date, format_time};
pub use roster::Roster;
pub use screen::{
    LOAD_FAILURE_MESSAGE, LoadState, Screen, TableBody, save_failure_message,
};
pub use store::{
    CountrySource, RecordStore, SaveOutcome, SaveRequest, Snapshot, load_snapshot,
};
pub use table::{
    COLUMNS, Column, ColumnKey, DateCell, GenderClass, GenderTag, TableProjector, TableRow, UNKNOWN,
};
