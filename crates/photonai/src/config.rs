//! Configuration for the PhotonAI client

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Header used by [`AuthMode::ApiKey`].
pub const API_KEY_HEADER: &str = "api-key";

/// How the API key is presented to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// `Authorization: Bearer <key>` (standard OpenAI endpoints)
    #[default]
    Bearer,
    /// `api-key: <key>` (Azure-style deployments)
    ApiKey,
}

impl AuthMode {
    /// Name used in configuration, e.g. `OPENAI_AUTH_MODE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::ApiKey => "api-key",
        }
    }

    /// Header carrying the credential for `api_key`.
    ///
    /// The value is marked sensitive so it never shows up in debug output.
    pub fn header(&self, api_key: &str) -> Result<(HeaderName, HeaderValue)> {
        let (name, value) = match self {
            Self::Bearer => (AUTHORIZATION, format!("Bearer {}", api_key)),
            Self::ApiKey => (HeaderName::from_static(API_KEY_HEADER), api_key.to_string()),
        };

        let mut value = HeaderValue::from_str(&value)
            .map_err(|_| Error::InvalidHeaderValue(format!("{} header", name)))?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl FromStr for AuthMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "api-key" | "api_key" | "apikey" | "azure" => Ok(Self::ApiKey),
            other => Err(Error::InvalidConfig(format!(
                "unknown auth mode '{}', expected 'bearer' or 'api-key'",
                other
            ))),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the PhotonAI client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for authentication
    pub api_key: Option<SecretString>,

    /// How the API key is sent
    pub auth_mode: AuthMode,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// Timeout for single-shot requests
    pub timeout: Duration,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            auth_mode: AuthMode::default(),
            base_url: None,
            timeout: Duration::from_secs(600),
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    /// This will look for:
    /// - `OPENAI_API_KEY` for authentication
    /// - `OPENAI_BASE_URL` for the API base URL
    /// - `OPENAI_AUTH_MODE` for the auth header style (`bearer` or `api-key`)
    /// - `OPENAI_TIMEOUT` for request timeout (in seconds)
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_AUTH_MODE` or `OPENAI_TIMEOUT` is set to a
    /// value that cannot be parsed.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(auth_mode) = env::var("OPENAI_AUTH_MODE") {
            config.auth_mode = auth_mode.parse()?;
        }

        if let Ok(timeout) = env::var("OPENAI_TIMEOUT") {
            let seconds = timeout.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!("OPENAI_TIMEOUT must be seconds, got '{}'", timeout))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    /// Base URL to connect to, falling back to [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(crate::DEFAULT_BASE_URL)
    }

    /// Headers sent with every request.
    ///
    /// The credential header comes first, then `Content-Type`, then the
    /// custom headers in insertion order. A custom header replaces a built-in
    /// one of the same name in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] if no API key is configured.
    pub fn session_headers(&self) -> Result<HeaderMap> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::MissingConfig("API key (set OPENAI_API_KEY)".to_string()))?;

        let mut headers = HeaderMap::new();
        let (name, value) = self.auth_mode.header(api_key.expose_secret())?;
        headers.insert(name, value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.default_headers {
            headers.insert(name.clone(), value.clone());
        }

        Ok(headers)
    }
}
