//! Request dispatching
//!
//! [`RequestHandler`] is the one place where per-call request data meets the
//! client-wide [`SessionConfiguration`]: it resolves the URL, applies the
//! default headers and encodes the body before handing the prepared request
//! to a [`Transport`].

use photonai_protocol::{AiRequest, RequestMethod};
use photonai_transport::{
    CancellationToken, HttpRequest, RequestError, ResponseStream, SessionConfiguration,
    Transport, TransportExt,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Binds a transport to a session configuration.
///
/// Every call is independent: nothing is cached or coalesced between calls.
#[derive(Debug)]
pub struct RequestHandler {
    transport: Box<dyn Transport>,
    configuration: Arc<SessionConfiguration>,
}

impl RequestHandler {
    /// Create a handler that sends requests through `transport`.
    pub fn new(transport: Box<dyn Transport>, configuration: Arc<SessionConfiguration>) -> Self {
        Self {
            transport,
            configuration,
        }
    }

    /// Session configuration applied to every request.
    pub fn configuration(&self) -> &SessionConfiguration {
        &self.configuration
    }

    /// Turn an operation into a wire request.
    ///
    /// Default headers are applied in their configured order. `POST` bodies
    /// are encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Serialization`] if the body cannot be encoded.
    /// No request is ever sent with an empty body in place of a failed one.
    pub fn prepare<Req: AiRequest>(&self, request: &Req) -> Result<HttpRequest, RequestError> {
        let url = self.configuration.url_for(request.path());

        let mut prepared = HttpRequest::new(request.method(), url)
            .with_headers(self.configuration.default_headers())
            .with_stream_mode(request.stream_mode());

        if request.method() == RequestMethod::Post {
            let body = serde_json::to_vec(request.body()).map_err(RequestError::serialization)?;
            debug!(
                url = %prepared.url,
                body_size = body.len(),
                stream_mode = prepared.stream_mode,
                "Prepared request"
            );
            prepared = prepared.with_body(body);
        }

        Ok(prepared)
    }

    /// Send a single-shot request and decode the response as `T`.
    pub async fn request<T, Req>(&self, request: &Req) -> Result<T, RequestError>
    where
        T: DeserializeOwned + Send,
        Req: AiRequest,
    {
        let prepared = self.prepare(request)?;
        self.transport.execute_decoded(prepared).await
    }

    /// Like [`request`](Self::request), but resolves to `Ok(None)` as soon as
    /// `token` is cancelled.
    pub async fn request_until_cancelled<T, Req>(
        &self,
        request: &Req,
        token: &CancellationToken,
    ) -> Result<Option<T>, RequestError>
    where
        T: DeserializeOwned + Send,
        Req: AiRequest,
    {
        let prepared = self.prepare(request)?;
        self.transport.execute_until_cancelled(prepared, token).await
    }

    /// Open a streaming request, decoding each event as `T` and passing it
    /// through `transform`.
    ///
    /// Never suspends. Preparation failures and stream-mode mismatches are
    /// reported as the single item of the returned stream.
    pub fn stream<T, R, F, Req>(&self, request: &Req, transform: F) -> ResponseStream<R>
    where
        T: DeserializeOwned + 'static,
        R: Send + 'static,
        F: FnMut(T) -> R + Send + 'static,
        Req: AiRequest,
    {
        match self.prepare(request) {
            Ok(prepared) => self.transport.stream_decoded(prepared, transform),
            Err(error) => {
                ResponseStream::failed(self.configuration.url_for(request.path()), error)
            }
        }
    }
}
