//! Request error classification
//!
//! Every failure a request can run into ends up as a [`RequestError`]. The
//! order in which a response is checked is fixed: a transport error wins over
//! a status check, which wins over a decode failure.

use std::fmt;
use thiserror::Error;

/// Result type for request operations
pub type Result<T> = std::result::Result<T, RequestError>;

/// Code reported when no HTTP status is available.
pub const NO_STATUS_CODE: i32 = -1;

/// Message used for responses outside the 2xx range.
pub const NON_SUCCESS_STATUS_MESSAGE: &str = "Response with non-success status code";

/// Error raised while sending a request or consuming its response.
///
/// Use [`message`](Self::message) and [`code`](Self::code) to inspect it, or
/// format it for display:
///
/// ```
/// # use photonai_transport::RequestError;
/// let error = RequestError::HttpStatus { status: 429 };
/// assert_eq!(
///     error.to_string(),
///     "Error: Response with non-success status code code: 429"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The transport failed before any status was available (DNS, TLS,
    /// timeout, connection reset).
    #[error("Error: {message} code: -1")]
    Transport {
        /// Description reported by the transport
        message: String,
    },

    /// The server answered with a status outside `[200, 300)`.
    #[error("Error: Response with non-success status code code: {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The response was successful but its body did not decode.
    #[error("Error: {message} code: -1")]
    Decode {
        /// Decoder description
        message: String,
    },

    /// The request was sent through the execution path that does not match
    /// its stream flag.
    #[error("Error: {} code: -1", stream_mode_message(.stream_mode))]
    StreamModeMismatch {
        /// Stream flag carried by the request
        stream_mode: bool,
    },

    /// The request body could not be encoded. Raised before any network call.
    #[error("Error: {message} code: -1")]
    Serialization {
        /// Encoder description
        message: String,
    },
}

fn stream_mode_message(stream_mode: &bool) -> &'static str {
    if *stream_mode {
        "Request is set to stream mode."
    } else {
        "Request is not set to stream mode."
    }
}

impl RequestError {
    /// Create a transport-level error from the transport's description.
    pub fn transport(error: impl fmt::Display) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }

    /// Create a decode error.
    pub fn decode(error: impl fmt::Display) -> Self {
        Self::Decode {
            message: format!("Unknown error: {}", error),
        }
    }

    /// Create a serialization error.
    pub fn serialization(error: impl fmt::Display) -> Self {
        Self::Serialization {
            message: format!("Failed to encode request body: {}", error),
        }
    }

    /// Human-readable message, without the code.
    pub fn message(&self) -> String {
        match self {
            Self::Transport { message }
            | Self::Decode { message }
            | Self::Serialization { message } => message.clone(),
            Self::HttpStatus { .. } => NON_SUCCESS_STATUS_MESSAGE.to_string(),
            Self::StreamModeMismatch { stream_mode } => {
                stream_mode_message(stream_mode).to_string()
            }
        }
    }

    /// HTTP status code, or [`NO_STATUS_CODE`] when none is available.
    pub fn code(&self) -> i32 {
        match self {
            Self::HttpStatus { status } => i32::from(*status),
            _ => NO_STATUS_CODE,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Check whether this error carries the given HTTP status.
    pub fn is_status(&self, status: u16) -> bool {
        self.status() == Some(status)
    }
}

/// Check whether a status code is in the success range.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Classify the outcome of a single-shot call.
///
/// A transport error takes priority, then the status check, then decoding of
/// the body.
pub fn classify<T, E>(
    outcome: std::result::Result<(u16, T), E>,
) -> std::result::Result<T, RequestError>
where
    E: Into<RequestError>,
{
    let (status, payload) = outcome.map_err(Into::into)?;
    if !is_success_status(status) {
        return Err(RequestError::HttpStatus { status });
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_transport_error_has_no_status() {
        let error = RequestError::transport("dns error: failed to lookup address");
        assert_eq!(error.code(), -1);
        assert_eq!(error.status(), None);
        assert_eq!(error.message(), "dns error: failed to lookup address");
        assert_eq!(
            error.to_string(),
            "Error: dns error: failed to lookup address code: -1"
        );
    }

    #[rstest]
    #[case(400)]
    #[case(401)]
    #[case(429)]
    #[case(500)]
    fn test_status_error_reports_status(#[case] status: u16) {
        let error = RequestError::HttpStatus { status };
        assert_eq!(error.code(), i32::from(status));
        assert!(error.is_status(status));
        assert_eq!(error.message(), NON_SUCCESS_STATUS_MESSAGE);
    }

    #[test]
    fn test_decode_error_is_unknown() {
        let error = RequestError::decode("expected value at line 1 column 1");
        assert_eq!(error.code(), -1);
        assert!(error.message().starts_with("Unknown error"));
    }

    #[test]
    fn test_stream_mode_messages() {
        let not_stream = RequestError::StreamModeMismatch { stream_mode: false };
        assert_eq!(
            not_stream.to_string(),
            "Error: Request is not set to stream mode. code: -1"
        );

        let stream = RequestError::StreamModeMismatch { stream_mode: true };
        assert_eq!(stream.message(), "Request is set to stream mode.");
        assert_eq!(stream.code(), -1);
    }

    #[rstest]
    #[case(199, false)]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(300, false)]
    #[case(429, false)]
    fn test_success_range(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(is_success_status(status), expected);
    }

    #[test]
    fn test_classify_priority() {
        let transport: std::result::Result<(u16, ()), RequestError> =
            Err(RequestError::transport("connection reset"));
        assert!(matches!(
            classify(transport),
            Err(RequestError::Transport { .. })
        ));

        let status: std::result::Result<(u16, &str), RequestError> = Ok((503, "not json"));
        assert_eq!(classify(status), Err(RequestError::HttpStatus { status: 503 }));

        let ok: std::result::Result<(u16, &str), RequestError> = Ok((200, "body"));
        assert_eq!(classify(ok), Ok("body"));
    }
}
