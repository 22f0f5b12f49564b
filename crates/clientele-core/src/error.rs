//! Error types for the core crate.

use thiserror::Error;

/// Errors returned by record store and country source implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request did not complete within the transport timeout.
    #[error("request timed out")]
    Timeout,
    /// Connection or protocol failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Reasons a form submission is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// Name, gender, or country is empty.
    #[error("name, gender, and country are required")]
    Incomplete,
    /// A save for this form is already in flight.
    #[error("a save is already in progress")]
    SaveInFlight,
    /// No form is open.
    #[error("no form is open")]
    NotOpen,
}
