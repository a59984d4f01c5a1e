//! Cancellable response streams
//!
//! A [`ResponseStream`] is handed out as soon as a streaming request is
//! issued. Items are pulled one at a time in the order the server sent them.
//! Cancelling the stream (explicitly, through a [`CancellationToken`], or by
//! dropping it) aborts the underlying connection exactly once.

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, Stream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::sync::CancellationToken;

use crate::error::{RequestError, Result};
use crate::observability::{self, StreamContext};

enum State<R> {
    /// Connection open (or about to be opened on first poll)
    Active(BoxStream<'static, Result<R>>),
    /// Failed before any network call; the error is yielded once
    Failed(RequestError),
    /// Ended by the server, by an error, or after a pending failure
    Finished,
    /// Aborted by the consumer
    Cancelled,
}

/// Lazy sequence of decoded events from a streaming request.
///
/// The stream ends after the server signals completion, after the first
/// error, or after cancellation. Once ended it keeps returning `None`.
///
/// ```ignore
/// let mut stream = client.chat_completion().stream(&request);
/// while let Some(event) = stream.next().await {
///     let event = event?;
///     print!("{}", event.content());
/// }
/// ```
pub struct ResponseStream<R> {
    state: State<R>,
    context: StreamContext,
    cancellation: Option<BoxFuture<'static, ()>>,
}

impl<R> ResponseStream<R> {
    /// Wrap an active stream of decoded items.
    pub fn new(url: impl Into<String>, inner: BoxStream<'static, Result<R>>) -> Self {
        Self {
            state: State::Active(inner),
            context: StreamContext::new(url),
            cancellation: None,
        }
    }

    /// A stream that yields `error` once and then ends, without touching the
    /// network.
    pub fn failed(url: impl Into<String>, error: RequestError) -> Self {
        Self {
            state: State::Failed(error),
            context: StreamContext::new(url),
            cancellation: None,
        }
    }

    /// Cancel the stream when `token` is cancelled.
    ///
    /// The token is checked on every pull, and cancelling it wakes a consumer
    /// that is waiting for the next event.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token.cancelled_owned().boxed());
        self
    }

    /// Abort the underlying connection.
    ///
    /// Returns `true` if this call aborted an open connection. Cancelling a
    /// stream that already ended, or cancelling twice, does nothing.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.state, State::Cancelled) {
            State::Active(inner) => {
                observability::log_cancel(self.context.url());
                drop(inner);
                true
            }
            State::Failed(_) => false,
            previous => {
                self.state = previous;
                false
            }
        }
    }

    /// Whether the stream ended or was cancelled.
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, State::Finished | State::Cancelled)
    }

    /// Whether the stream was cancelled by the consumer.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.state, State::Cancelled)
    }

    /// Number of items delivered so far.
    pub fn delivered(&self) -> u64 {
        self.context.event_count
    }

    /// URL the stream was opened against.
    pub fn url(&self) -> &str {
        self.context.url()
    }
}

impl<R> Stream for ResponseStream<R> {
    type Item = Result<R>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(cancellation) = this.cancellation.as_mut()
            && cancellation.poll_unpin(cx).is_ready()
        {
            this.cancellation = None;
            this.cancel();
            return Poll::Ready(None);
        }

        match std::mem::replace(&mut this.state, State::Finished) {
            State::Active(mut inner) => match inner.poll_next_unpin(cx) {
                Poll::Pending => {
                    this.state = State::Active(inner);
                    Poll::Pending
                }
                Poll::Ready(Some(Ok(item))) => {
                    this.context.log_event();
                    this.state = State::Active(inner);
                    Poll::Ready(Some(Ok(item)))
                }
                Poll::Ready(Some(Err(error))) => {
                    this.context.log_error(&error.to_string());
                    Poll::Ready(Some(Err(error)))
                }
                Poll::Ready(None) => {
                    this.context.log_finished();
                    Poll::Ready(None)
                }
            },
            State::Failed(error) => {
                this.context.log_error(&error.to_string());
                Poll::Ready(Some(Err(error)))
            }
            State::Finished => Poll::Ready(None),
            State::Cancelled => {
                this.state = State::Cancelled;
                Poll::Ready(None)
            }
        }
    }
}

impl<R> Unpin for ResponseStream<R> {}

impl<R> Drop for ResponseStream<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<R> fmt::Debug for ResponseStream<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Active(_) => "active",
            State::Failed(_) => "failed",
            State::Finished => "finished",
            State::Cancelled => "cancelled",
        };
        f.debug_struct("ResponseStream")
            .field("url", &self.context.url())
            .field("state", &state)
            .field("delivered", &self.context.event_count)
            .finish()
    }
}
