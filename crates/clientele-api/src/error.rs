use clientele_core::StoreError;
use thiserror::Error;

/// Errors raised while talking to the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured endpoint could not be turned into a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The HTTP client could not be constructed.
    #[error("http client setup failed: {0}")]
    Setup(#[source] reqwest::Error),
    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,
    /// Connection or protocol failure.
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),
    /// The backend answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Http(err)
        }
    }
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Timeout => StoreError::Timeout,
            ApiError::Status { status, body } => StoreError::Status { status, body },
            ApiError::Decode(err) => StoreError::Decode(err.to_string()),
            other => StoreError::Transport(other.to_string()),
        }
    }
}
