//! REST-backed record store and country source.

mod client;
mod error;

pub use client::HttpStore;
pub use error::ApiError;
