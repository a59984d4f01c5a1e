//! Transport trait and wire types
//!
//! Defines the capability a networking backend has to provide. Requests
//! arrive fully prepared (URL, headers and body bytes already resolved), so a
//! backend never needs to know which API operation it is serving.

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use http::{HeaderMap, HeaderName, HeaderValue};
use photonai_protocol::RequestMethod;
use std::fmt;
use std::sync::Arc;

/// HTTP request specification
///
/// Represents a prepared request to be sent via a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: RequestMethod,

    /// Absolute request URL
    pub url: String,

    /// Request headers, in the order they are sent
    pub headers: HeaderMap,

    /// Encoded request body (optional)
    pub body: Option<Vec<u8>>,

    /// Whether the response is expected as a server-sent event stream
    pub stream_mode: bool,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            stream_mode: false,
        }
    }

    /// Add a header to the request, replacing any previous value
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Layer a set of headers on top of the current ones
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the stream flag
    pub fn with_stream_mode(mut self, stream_mode: bool) -> Self {
        self.stream_mode = stream_mode;
        self
    }
}

/// HTTP response
///
/// Represents a complete response received from the server.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        crate::error::is_success_status(self.status)
    }

    /// Get the response body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value by name (case-insensitive)
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Sentinel data sent by the server after the last event.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One server-sent event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerEvent {
    /// Event type (`message` when the server does not name one)
    pub event: String,

    /// Event payload
    pub data: String,

    /// Last event id
    pub id: String,
}

impl ServerEvent {
    /// Create a `message` event carrying `data`
    pub fn message(data: impl Into<String>) -> Self {
        Self {
            event: "message".to_string(),
            data: data.into(),
            id: String::new(),
        }
    }

    /// Check whether this event marks the end of the stream
    pub fn is_done(&self) -> bool {
        self.data.trim() == DONE_SENTINEL
    }
}

impl From<eventsource_stream::Event> for ServerEvent {
    fn from(event: eventsource_stream::Event) -> Self {
        Self {
            event: event.event,
            data: event.data,
            id: event.id,
        }
    }
}

/// Lazy stream of server-sent events.
///
/// Dropping the stream aborts the underlying connection.
pub type EventStream = BoxStream<'static, Result<ServerEvent>>;

/// Capability every networking backend must provide.
///
/// Implementations own the actual I/O. They report failures that happen
/// before a status is known as [`RequestError::Transport`]; status checks and
/// decoding are layered on top by [`TransportExt`].
///
/// [`RequestError::Transport`]: crate::RequestError::Transport
/// [`TransportExt`]: crate::TransportExt
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send one request and return the complete response.
    ///
    /// Dropping the returned future aborts the network operation.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Open a server-sent event stream.
    ///
    /// Returns without suspending; the connection is opened on first poll.
    /// A non-2xx status is reported as the first and only item.
    fn stream(&self, request: HttpRequest) -> EventStream;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request).await
    }

    fn stream(&self, request: HttpRequest) -> EventStream {
        (**self).stream(request)
    }
}
