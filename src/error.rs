//! Error types for the PayPal payments client.

use thiserror::Error;

use crate::paypal::types::ApiError;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, decoding or exchanging payment resources.
#[derive(Debug, Error)]
pub enum Error {
    /// A request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A response body did not match the expected resource shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The base URL cannot have path segments appended, e.g. `mailto:` URLs.
    #[error("invalid base url: `{0}`")]
    InvalidBaseUrl(String),

    /// A resource ID was empty, which would address the collection instead.
    #[error("missing {0} id")]
    EmptyId(&'static str),

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// The HTTP transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service rejected the request with an error body.
    #[error("request failed with status {status}: {}: {}", .error.name, .error.message)]
    Api { status: u16, error: ApiError },

    /// The service rejected the request and the body was not an error envelope.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl Error {
    pub fn transport(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(error.into())
    }

    /// The HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
