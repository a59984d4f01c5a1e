//! Cancellation behaviour of chat completion streams, using an in-memory
//! transport that counts aborted connections.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use http::HeaderMap;
use photonai::{
    CancellationToken, ChatCompletionBody, ChatCompletionRequest, Client, RequestError,
    SessionConfiguration, Transport,
};
use photonai_transport::{EventStream, HttpRequest, HttpResponse, ServerEvent};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Dropped together with the event stream it is attached to.
struct Connection {
    aborted: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
    delivered: usize,
    total: usize,
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.delivered < self.total {
            self.aborted.fetch_add(1, Ordering::SeqCst);
        } else {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[derive(Debug, Default)]
struct ScriptedTransport {
    events: usize,
    opened: Arc<AtomicUsize>,
    aborted: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

fn chunk(index: usize) -> String {
    format!(
        r#"{{"id":"chatcmpl-1","object":"chat.completion.chunk","created":1,"model":"gpt-3.5-turbo","choices":[{{"index":0,"delta":{{"content":"part{}"}}}}]}}"#,
        index
    )
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, _request: HttpRequest) -> photonai_transport::Result<HttpResponse> {
        Err(RequestError::transport("single-shot calls are not scripted"))
    }

    fn stream(&self, _request: HttpRequest) -> EventStream {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let connection = Connection {
            aborted: self.aborted.clone(),
            completed: self.completed.clone(),
            delivered: 0,
            total: self.events,
        };

        stream::unfold(connection, |mut connection| async move {
            if connection.delivered == connection.total {
                return None;
            }
            connection.delivered += 1;
            let event = ServerEvent::message(chunk(connection.delivered));
            Some((Ok(event), connection))
        })
        .boxed()
    }
}

struct Harness {
    client: Client,
    opened: Arc<AtomicUsize>,
    aborted: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

fn harness(events: usize) -> Harness {
    let transport = ScriptedTransport {
        events,
        ..Default::default()
    };
    let opened = transport.opened.clone();
    let aborted = transport.aborted.clone();
    let completed = transport.completed.clone();

    let configuration = SessionConfiguration::new("https", "api.example.com", HeaderMap::new());
    Harness {
        client: Client::from_transport(configuration, transport),
        opened,
        aborted,
        completed,
    }
}

fn request() -> ChatCompletionRequest {
    ChatCompletionRequest::new(ChatCompletionBody::from_messages("Count", None, None))
}

#[tokio::test]
async fn test_cancel_after_two_events() {
    let harness = harness(5);
    let mut stream = harness
        .client
        .chat_completion()
        .stream_with(&request(), |event| event.content());

    assert_eq!(stream.next().await, Some(Ok("part1".to_string())));
    assert_eq!(stream.next().await, Some(Ok("part2".to_string())));

    assert!(stream.cancel());
    assert_eq!(harness.aborted.load(Ordering::SeqCst), 1);

    assert_eq!(stream.next().await, None);
    assert!(!stream.cancel());
    drop(stream);

    assert_eq!(harness.opened.load(Ordering::SeqCst), 1);
    assert_eq!(harness.aborted.load(Ordering::SeqCst), 1);
    assert_eq!(harness.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_drop_aborts_connection() {
    let harness = harness(3);
    {
        let mut stream = harness.client.chat_completion().stream(&request());
        assert!(stream.next().await.is_some());
    }

    assert_eq!(harness.aborted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_token_cancels_stream() {
    let harness = harness(4);
    let token = CancellationToken::new();
    let mut stream = harness
        .client
        .chat_completion()
        .stream(&request())
        .with_cancellation(token.clone());

    assert!(stream.next().await.is_some());
    token.cancel();

    assert_eq!(stream.next().await, None);
    assert!(stream.is_cancelled());
    assert_eq!(stream.delivered(), 1);
    assert_eq!(harness.aborted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_full_stream_is_not_aborted() {
    let harness = harness(3);
    let contents: Vec<_> = harness
        .client
        .chat_completion()
        .stream_with(&request(), |event| event.content())
        .collect()
        .await;

    assert_eq!(
        contents,
        vec![
            Ok("part1".to_string()),
            Ok("part2".to_string()),
            Ok("part3".to_string())
        ]
    );
    assert_eq!(harness.aborted.load(Ordering::SeqCst), 0);
    assert_eq!(harness.completed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_independent_streams() {
    let harness = harness(2);
    let chat = harness.client.chat_completion();

    let first = chat.stream(&request());
    let second = chat.stream(&request());
    let (first, second): (Vec<_>, Vec<_>) = tokio::join!(first.collect(), second.collect());

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(harness.opened.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_single_shot_cancellation_with_token() {
    #[derive(Debug)]
    struct SlowTransport;

    #[async_trait]
    impl Transport for SlowTransport {
        async fn execute(&self, _request: HttpRequest) -> photonai_transport::Result<HttpResponse> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(RequestError::transport("too late"))
        }

        fn stream(&self, _request: HttpRequest) -> EventStream {
            stream::empty().boxed()
        }
    }

    let configuration = SessionConfiguration::new("https", "api.example.com", HeaderMap::new());
    let client = Client::from_transport(configuration, SlowTransport);
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        canceller.cancel();
    });

    let body = ChatCompletionBody::from_messages("Wait", None, None).with_stream(false);
    let result = client
        .chat_completion()
        .request_until_cancelled(&ChatCompletionRequest::new(body), &token)
        .await;

    assert_eq!(result, Ok(None));
}
