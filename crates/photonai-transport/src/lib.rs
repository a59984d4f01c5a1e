//! Transport abstraction layer for PhotonAI
//!
//! Provides the capability any networking backend has to satisfy, plus the
//! typed layer on top of it that decodes payloads, classifies failures and
//! hands out cancellable event streams.
//!
//! # Architecture
//!
//! - **Transport trait**: single-shot execution and server-sent event streaming
//! - **TransportExt**: JSON decoding, error classification and cancellation
//! - **ResponseStream**: lazy, cancellable sequence of decoded events
//! - **HTTP transport**: default backend built on reqwest
//! - **Error handling**: one [`RequestError`] shape for every failure source
//!
//! # Usage
//!
//! ```ignore
//! use photonai_transport::{HttpRequest, HttpTransport, TransportExt};
//! use photonai_protocol::RequestMethod;
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new(RequestMethod::Get, "https://api.openai.com/v1/models");
//! let models: serde_json::Value = transport.execute_decoded(request).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod ext;
pub mod http;
pub mod observability;
pub mod stream;
pub mod traits;

// Re-export commonly used types
pub use config::SessionConfiguration;
pub use error::{RequestError, Result};
pub use ext::TransportExt;
pub use http::{HttpTransport, HttpTransportConfig};
pub use stream::ResponseStream;
pub use traits::{EventStream, HttpRequest, HttpResponse, ServerEvent, Transport};

pub use tokio_util::sync::CancellationToken;
