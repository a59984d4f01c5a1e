//! HTTP transport client implementation

use crate::error::{RequestError, Result, is_success_status};
use crate::observability;
use crate::traits::{EventStream, HttpRequest, HttpResponse, ServerEvent, Transport};
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{StreamExt, TryStreamExt, stream};
use http::HeaderValue;
use http::header::ACCEPT;
use photonai_protocol::RequestMethod;
use reqwest::Client as ReqwestClient;
use std::time::{Duration, Instant};

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Connection pooling
/// - Per-request timeouts for single-shot calls
/// - Server-sent event streams that are aborted when dropped
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(RequestError::transport)?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Get a reference to the underlying reqwest client
    pub fn reqwest_client(&self) -> &ReqwestClient {
        &self.client
    }

    /// Set the timeout applied to single-shot requests
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout applied to single-shot requests
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = match request.method {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url).headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        builder
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.build_request(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(RequestError::transport)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(RequestError::transport)?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }

    fn stream(&self, request: HttpRequest) -> EventStream {
        let url = request.url.clone();
        let builder = self
            .build_request(request)
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"));

        stream::once(async move {
            let started = Instant::now();
            let response = match builder.send().await {
                Ok(response) => response,
                Err(e) => {
                    observability::log_complete(&url, None, started.elapsed());
                    return Err(RequestError::transport(e));
                }
            };

            let status = response.status().as_u16();
            observability::log_complete(&url, Some(status), started.elapsed());
            if !is_success_status(status) {
                return Err(RequestError::HttpStatus { status });
            }

            Ok(response.bytes_stream().eventsource().map(|event| {
                event
                    .map(ServerEvent::from)
                    .map_err(RequestError::transport)
            }))
        })
        .try_flatten()
        .boxed()
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Timeout for single-shot requests; streams are not bounded
    pub timeout: Option<Duration>,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(600)),
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_creation() {
        let transport = HttpTransport::new().expect("Failed to create transport");
        assert_eq!(transport.timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_http_transport_with_config() {
        let config = HttpTransportConfig {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 5,
        };

        let transport = HttpTransport::with_config(config).expect("Failed to create transport");
        assert_eq!(transport.timeout(), Some(Duration::from_secs(30)));

        let transport = transport.with_timeout(None);
        assert_eq!(transport.timeout(), None);
    }
}
