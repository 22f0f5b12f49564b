//! Test helpers shared across Clientele crates.

pub mod fixtures;
pub mod store;

pub use fixtures::{country, customer, sample_countries, sample_records, sample_records_json};
pub use store::{StoreCall, StubStore};
