//! Chat Completion API endpoint

use photonai_protocol::AiRequest;
use photonai_transport::{CancellationToken, RequestError, ResponseStream};
use tracing::debug;

use crate::handler::RequestHandler;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatStreamResponse};

/// Chat Completion API resource.
///
/// Borrowed from a [`Client`](crate::Client) and therefore bound to its
/// lifetime. Whether a request is streamed is decided by the body's `stream`
/// flag: use [`stream`](Self::stream) for streamed bodies and
/// [`request`](Self::request) for the rest.
#[derive(Debug, Clone, Copy)]
pub struct ChatCompletion<'a> {
    handler: &'a RequestHandler,
}

impl<'a> ChatCompletion<'a> {
    pub(crate) fn new(handler: &'a RequestHandler) -> Self {
        Self { handler }
    }

    /// Stream a chat completion.
    ///
    /// Returns immediately with an active stream. Dropping the stream, or
    /// calling [`ResponseStream::cancel`], aborts the request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use photonai::{ChatCompletionBody, ChatCompletionRequest, Client};
    /// # use futures::StreamExt;
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let request = ChatCompletionRequest::new(ChatCompletionBody::from_messages(
    ///     "Tell me a story",
    ///     None,
    ///     None,
    /// ));
    ///
    /// let mut stream = client.chat_completion().stream(&request);
    /// while let Some(event) = stream.next().await {
    ///     print!("{}", event?.content());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn stream(&self, request: &ChatCompletionRequest) -> ResponseStream<ChatStreamResponse> {
        self.stream_with(request, |event| event)
    }

    /// Stream a chat completion, converting every event with `transform`.
    ///
    /// ```rust,no_run
    /// # use photonai::{ChatCompletionRequest, ChatStreamResponse, Client};
    /// # fn example(client: Client, request: ChatCompletionRequest) {
    /// let text_only = client
    ///     .chat_completion()
    ///     .stream_with(&request, |event: ChatStreamResponse| event.content());
    /// # }
    /// ```
    pub fn stream_with<T, F>(&self, request: &ChatCompletionRequest, transform: F) -> ResponseStream<T>
    where
        T: Send + 'static,
        F: FnMut(ChatStreamResponse) -> T + Send + 'static,
    {
        debug!(
            model = %request.body().model,
            message_count = request.body().messages.len(),
            "Streaming chat completion"
        );
        self.handler.stream(request, transform)
    }

    /// Send a chat completion and wait for the complete response.
    ///
    /// The body must have `stream` set to `false`.
    pub async fn request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, RequestError> {
        debug!(
            model = %request.body().model,
            message_count = request.body().messages.len(),
            "Requesting chat completion"
        );
        self.handler.request(request).await
    }

    /// Like [`request`](Self::request), but resolves to `Ok(None)` once
    /// `token` is cancelled.
    pub async fn request_until_cancelled(
        &self,
        request: &ChatCompletionRequest,
        token: &CancellationToken,
    ) -> Result<Option<ChatCompletionResponse>, RequestError> {
        self.handler.request_until_cancelled(request, token).await
    }
}
