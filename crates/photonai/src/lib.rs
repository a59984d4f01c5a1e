//! # PhotonAI
//!
//! Async client for OpenAI-compatible chat completion APIs supporting:
//! - Single-shot requests decoded into typed responses
//! - Incremental delivery through cancellable server-sent event streams
//! - Uniform error classification across both modes
//! - Pluggable transports (the default one is built on reqwest)
//! - Bearer or `api-key` (Azure-style) authentication
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use photonai::{ChatCompletionBody, ChatCompletionRequest, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-api-key");
//!
//!     let request = ChatCompletionRequest::new(ChatCompletionBody::from_messages(
//!         "Hello!",
//!         Some("You are a helpful assistant.".to_string()),
//!         None,
//!     ));
//!
//!     let mut stream = client.chat_completion().stream(&request);
//!     while let Some(event) = stream.next().await {
//!         print!("{}", event?.content());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{AuthMode, ClientConfig};
pub use error::{Error, Result};
pub use handler::RequestHandler;
pub use resources::ChatCompletion;
pub use types::*;

pub use photonai_protocol::{AiRequest, RequestBody, RequestMethod, TextRequestBody};
pub use photonai_transport::{
    CancellationToken, HttpTransport, RequestError, ResponseStream, SessionConfiguration,
    Transport,
};

#[cfg(feature = "trace")]
pub use observability::init_tracing;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod observability;
pub mod resources;
pub mod types;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use photonai::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancellationToken, ChatCompletionBody, ChatCompletionRequest, ChatCompletionResponse,
        ChatMessage, ChatStreamResponse, Client, ClientConfig, Error, RequestError,
        ResponseStream, Result, Role,
    };
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
