//! Error types for the PhotonAI client
//!
//! Request failures are reported as [`RequestError`], which carries a message
//! and a status code. [`Error`] covers everything that can go wrong while a
//! client is being put together, and wraps [`RequestError`] for callers who
//! prefer a single error type.

use photonai_transport::RequestError;
use thiserror::Error;

use crate::types::ChatCompletionBodyBuilderError;

/// Result type alias for client construction and configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PhotonAI client.
#[derive(Debug, Error)]
pub enum Error {
    /// A request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Required configuration is missing, e.g. no API key.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Base URL is malformed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header name rejected by the HTTP layer.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Header value rejected by the HTTP layer.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// A request body builder was missing a required field.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// The wrapped request error, if this is one.
    pub fn as_request_error(&self) -> Option<&RequestError> {
        match self {
            Self::Request(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ChatCompletionBodyBuilderError> for Error {
    fn from(error: ChatCompletionBodyBuilderError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}
