//! Request contract
//!
//! Every API operation describes itself through [`AiRequest`]. Transports
//! only ever see this contract, never the concrete operation type.

use serde::Serialize;
use std::fmt;

use crate::model::AiModel;

/// HTTP method used by an API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
}

impl RequestMethod {
    /// Upper-case method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker for payloads that can be sent as a request body.
pub trait RequestBody: Serialize + Send + Sync {}

/// A request body that targets a text generation model.
pub trait TextRequestBody: RequestBody {
    /// Model the body is addressed to.
    fn model(&self) -> &AiModel;
}

/// Contract every API operation must satisfy.
///
/// `stream_mode` decides the execution path: a stream-flagged request must be
/// sent through the streaming path, any other request through the single-shot
/// path. Transports reject mismatched use instead of correcting it.
pub trait AiRequest: Send + Sync {
    /// Body type serialized into the request.
    type Body: RequestBody;

    /// Request body.
    fn body(&self) -> &Self::Body;

    /// Endpoint path, starting with `/`.
    fn path(&self) -> &str;

    /// HTTP method.
    fn method(&self) -> RequestMethod;

    /// Whether the response is delivered as a server-sent event stream.
    fn stream_mode(&self) -> bool;
}
