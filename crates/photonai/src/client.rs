//! Main client implementation for OpenAI-compatible APIs

use std::sync::Arc;
use std::time::Duration;

use photonai_transport::{HttpTransport, HttpTransportConfig, SessionConfiguration, Transport};
use secrecy::SecretString;
use url::Url;

use crate::{
    config::{AuthMode, ClientConfig},
    error::{Error, Result},
    handler::RequestHandler,
    resources::ChatCompletion,
};

/// Main client for interacting with an OpenAI-compatible API.
///
/// Cloning is cheap: clones share the same transport and configuration. To
/// switch API keys, build a new client and drop the old one.
///
/// # Example
///
/// ```rust,no_run
/// use photonai::Client;
///
/// let client = Client::new("sk-...");
/// let chat = client.chat_completion();
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    handler: Arc<RequestHandler>,
}

impl Client {
    /// Create a new client with an API key.
    ///
    /// The key is sent as `Authorization: Bearer <key>` to
    /// [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    ///
    /// # Panics
    ///
    /// This convenience method panics if the client cannot be built, e.g.
    /// when the key contains characters that are not valid in a header. For
    /// fallible construction use [`Client::try_new()`] instead.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder()
            .api_key(api_key)
            .build()
            .expect("Failed to build client with provided API key")
    }

    /// Create a new client with an API key (fallible version).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn try_new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The base URL is empty, malformed or not `http`/`https`
    /// - A header value is invalid
    /// - The HTTP client cannot be built
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url().trim();
        if base_url.is_empty() {
            return Err(Error::InvalidUrl("base URL cannot be empty".to_string()));
        }

        let url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("'{}': {}", base_url, e)))?;
        let headers = config.session_headers()?;
        let configuration = SessionConfiguration::from_url(&url, headers)
            .map_err(|e| Error::InvalidUrl(e.message()))?;

        let transport = HttpTransport::with_config(HttpTransportConfig {
            timeout: Some(config.timeout),
            ..HttpTransportConfig::default()
        })
        .map_err(|e| Error::HttpClient(e.message()))?;

        Ok(Self::from_transport(configuration, transport))
    }

    /// Create a client with a custom transport.
    ///
    /// The configuration's default headers are sent as they are, so they
    /// must already carry the credential.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use photonai::Client;
    /// use photonai_transport::{HttpTransport, SessionConfiguration};
    /// use http::HeaderMap;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let configuration = SessionConfiguration::new("http", "localhost:8080", HeaderMap::new());
    /// let client = Client::from_transport(configuration, HttpTransport::new()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_transport(
        configuration: SessionConfiguration,
        transport: impl Transport + 'static,
    ) -> Self {
        let handler = RequestHandler::new(Box::new(transport), Arc::new(configuration));
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Access the Chat Completion API endpoint.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use photonai::{ChatCompletionBody, ChatCompletionRequest, Client};
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let body = ChatCompletionBody::from_messages("Hello!", None, None).with_stream(false);
    /// let response = client
    ///     .chat_completion()
    ///     .request(&ChatCompletionRequest::new(body))
    ///     .await?;
    /// println!("{}", response.content().unwrap_or_default());
    /// # Ok(())
    /// # }
    /// ```
    pub fn chat_completion(&self) -> ChatCompletion<'_> {
        ChatCompletion::new(&self.handler)
    }

    /// Session configuration shared by every request.
    pub fn configuration(&self) -> &SessionConfiguration {
        self.handler.configuration()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> String {
        self.configuration().base_url()
    }
}

/// Builder for creating a configured Client.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set how the API key is sent.
    pub fn auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.config.auth_mode = auth_mode;
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout for single-shot requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
