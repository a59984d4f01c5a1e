//! Typed layer over a [`Transport`]
//!
//! [`TransportExt`] is implemented for every transport. It enforces the
//! stream-mode contract, classifies failures and decodes JSON payloads, so
//! backends only ever deal with bytes and raw events.

use futures::{StreamExt, future};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{RequestError, Result, classify};
use crate::observability::{self, InFlight};
use crate::stream::ResponseStream;
use crate::traits::{EventStream, HttpRequest, Transport};

/// Decoding, classification and cancellation on top of [`Transport`].
pub trait TransportExt: Transport {
    /// Send a single-shot request and decode the body as `T`.
    ///
    /// Fails fast with [`RequestError::StreamModeMismatch`] if the request is
    /// stream-flagged. Otherwise failures are classified in a fixed order:
    /// transport error, then status, then decoding.
    fn execute_decoded<T>(&self, request: HttpRequest) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send;

    /// Like [`execute_decoded`](Self::execute_decoded), but gives up as soon
    /// as `token` is cancelled.
    ///
    /// Cancellation aborts the in-flight call and yields `Ok(None)`; it is
    /// not an error.
    fn execute_until_cancelled<T>(
        &self,
        request: HttpRequest,
        token: &CancellationToken,
    ) -> impl Future<Output = Result<Option<T>>> + Send
    where
        T: DeserializeOwned + Send;

    /// Open a streaming request, decode every event as `T` and apply
    /// `transform` before delivery.
    ///
    /// Returns without suspending. If the request is not stream-flagged the
    /// stream yields a single [`RequestError::StreamModeMismatch`] and no
    /// network call is made.
    fn stream_decoded<T, R, F>(&self, request: HttpRequest, transform: F) -> ResponseStream<R>
    where
        T: DeserializeOwned + 'static,
        R: Send + 'static,
        F: FnMut(T) -> R + Send + 'static;
}

impl<X: Transport + ?Sized> TransportExt for X {
    async fn execute_decoded<T>(&self, request: HttpRequest) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let in_flight = InFlight::new(request.url.clone());
        send_decoded(self, request, in_flight).await
    }

    async fn execute_until_cancelled<T>(
        &self,
        request: HttpRequest,
        token: &CancellationToken,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        // Created eagerly so an abandoned call is logged even if it was never polled.
        let in_flight = InFlight::new(request.url.clone());

        tokio::select! {
            biased;
            _ = token.cancelled() => Ok(None),
            result = send_decoded::<X, T>(self, request, in_flight) => result.map(Some),
        }
    }

    fn stream_decoded<T, R, F>(&self, request: HttpRequest, transform: F) -> ResponseStream<R>
    where
        T: DeserializeOwned + 'static,
        R: Send + 'static,
        F: FnMut(T) -> R + Send + 'static,
    {
        let url = request.url.clone();
        observability::log_start(&url);

        if !request.stream_mode {
            return ResponseStream::failed(url, RequestError::StreamModeMismatch { stream_mode: false });
        }

        let events = decode_events(self.stream(request), transform);
        ResponseStream::new(url, events)
    }
}

/// Single-shot call shared by both execute paths.
///
/// `in_flight` logs a cancellation if this future is dropped before the call
/// reaches an outcome.
async fn send_decoded<X, T>(transport: &X, request: HttpRequest, in_flight: InFlight) -> Result<T>
where
    X: Transport + ?Sized,
    T: DeserializeOwned + Send,
{
    observability::log_start(in_flight.url());

    if request.stream_mode {
        in_flight.finish();
        return Err(RequestError::StreamModeMismatch { stream_mode: true });
    }

    let started = Instant::now();
    let outcome = transport
        .execute(request)
        .await
        .map(|response| (response.status, response));

    let status = outcome.as_ref().ok().map(|(status, _)| *status);
    observability::log_complete(in_flight.url(), status, started.elapsed());
    in_flight.finish();

    let response = classify(outcome)?;
    serde_json::from_slice(&response.body).map_err(RequestError::decode)
}

/// Turn raw events into decoded, transformed items.
///
/// The `[DONE]` sentinel ends the sequence and keep-alive events without data
/// are skipped.
fn decode_events<T, R, F>(
    events: EventStream,
    mut transform: F,
) -> futures::stream::BoxStream<'static, Result<R>>
where
    T: DeserializeOwned + 'static,
    R: Send + 'static,
    F: FnMut(T) -> R + Send + 'static,
{
    events
        .take_while(|event| future::ready(!matches!(event, Ok(event) if event.is_done())))
        .filter_map(move |event| {
            let item = match event {
                Ok(event) if event.data.trim().is_empty() => None,
                Ok(event) => Some(
                    serde_json::from_str::<T>(&event.data)
                        .map(&mut transform)
                        .map_err(RequestError::decode),
                ),
                Err(error) => Some(Err(error)),
            };
            future::ready(item)
        })
        .boxed()
}
