//! Session configuration

use http::HeaderMap;
use url::Url;

use crate::error::{RequestError, Result};

/// Connection parameters shared by every request of one client.
///
/// Immutable once built. Clients keep it behind an `Arc` and hand out
/// references for each call.
#[derive(Debug, Clone)]
pub struct SessionConfiguration {
    scheme: String,
    host: String,
    default_headers: HeaderMap,
}

impl SessionConfiguration {
    /// Create a configuration from its parts.
    ///
    /// `host` may carry a port, e.g. `localhost:8080`.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, default_headers: HeaderMap) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            default_headers,
        }
    }

    /// Create a configuration from a base URL such as `https://api.openai.com`.
    ///
    /// Operations supply their own `/v1/...` paths, so the base URL may only
    /// carry an empty path, `/` or `/v1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no host, a scheme other than
    /// `http`/`https`, a query, or any other path.
    pub fn from_url(base_url: &Url, default_headers: HeaderMap) -> Result<Self> {
        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(RequestError::transport(format!(
                    "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                    scheme
                )));
            }
        }

        let path = base_url.path().trim_end_matches('/');
        if !(path.is_empty() || path == "/v1") || base_url.query().is_some() {
            return Err(RequestError::transport(format!(
                "URL '{}' carries a path or query; only '/' or '/v1' is supported",
                base_url
            )));
        }

        let host = base_url
            .host_str()
            .ok_or_else(|| RequestError::transport(format!("URL '{}' has no host", base_url)))?;
        let host = match base_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self::new(base_url.scheme(), host, default_headers))
    }

    /// URL scheme, e.g. `https`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host, including the port when one was given.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Headers applied to every request, in insertion order.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// `{scheme}://{host}`
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Absolute URL for an operation path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme, self.host, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use rstest::rstest;

    #[test]
    fn test_url_for_path() {
        let config = SessionConfiguration::new("https", "api.openai.com", HeaderMap::new());
        assert_eq!(config.base_url(), "https://api.openai.com");
        assert_eq!(
            config.url_for("/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_from_url_keeps_port() {
        let url: Url = "http://127.0.0.1:8080/".parse().unwrap();
        let config = SessionConfiguration::from_url(&url, HeaderMap::new()).unwrap();
        assert_eq!(config.scheme(), "http");
        assert_eq!(config.host(), "127.0.0.1:8080");
        assert_eq!(config.url_for("/v1/x"), "http://127.0.0.1:8080/v1/x");
    }

    #[rstest]
    #[case("https://api.openai.com")]
    #[case("https://api.openai.com/")]
    #[case("https://api.openai.com/v1")]
    #[case("https://api.openai.com/v1/")]
    fn test_from_url_accepts_root_paths(#[case] base: &str) {
        let url: Url = base.parse().unwrap();
        let config = SessionConfiguration::from_url(&url, HeaderMap::new()).unwrap();
        assert_eq!(config.base_url(), "https://api.openai.com");
    }

    #[rstest]
    #[case("https://proxy.example.com/openai/v1")]
    #[case("https://proxy.example.com/deployments")]
    #[case("https://proxy.example.com/?api-version=2024-02-01")]
    fn test_from_url_rejects_paths_it_would_drop(#[case] base: &str) {
        let url: Url = base.parse().unwrap();
        let error = SessionConfiguration::from_url(&url, HeaderMap::new()).unwrap_err();
        assert!(error.message().contains("path or query"));
    }

    #[test]
    fn test_from_url_rejects_other_schemes() {
        let url: Url = "ftp://example.com".parse().unwrap();
        let error = SessionConfiguration::from_url(&url, HeaderMap::new()).unwrap_err();
        assert!(error.message().contains("ftp"));
    }

    #[test]
    fn test_default_headers_keep_order() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer key"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("x-extra", HeaderValue::from_static("1"));

        let config = SessionConfiguration::new("https", "example.com", headers);
        let names: Vec<_> = config
            .default_headers()
            .keys()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["authorization", "content-type", "x-extra"]);
    }
}
