//! Shared request contracts for the PhotonAI client and its transports
//!
//! This crate describes what an API operation has to supply so that any
//! transport can send it: a serializable body, a path, an HTTP method and a
//! stream flag. It also carries the [`AiModel`] identifiers used by text
//! generation bodies.
//!
//! # Type Organization
//!
//! - **Request contract**: [`request`] - `AiRequest`, `RequestBody`, `TextRequestBody`
//! - **Model identifiers**: [`model`] - `AiModel`
//!
//! # Design Principles
//!
//! - **Zero I/O**: All types are pure data structures
//! - **Serialization**: serde-based, JSON on the wire
//! - **No transport coupling**: nothing here knows how a request is sent

//!
//! # Usage
//!
//! ```ignore
//! use photonai_protocol::{AiRequest, RequestMethod};
//!
//! fn describe(request: &impl AiRequest) -> String {
//!     format!("{} {}", request.method(), request.path())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod request;

// Re-export commonly used types at crate level
pub use model::AiModel;
pub use request::{AiRequest, RequestBody, RequestMethod, TextRequestBody};
