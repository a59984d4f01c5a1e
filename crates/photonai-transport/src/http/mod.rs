//! HTTP transport implementation
//!
//! Provides the default [`Transport`](crate::Transport) backend on top of
//! reqwest, with server-sent event parsing by eventsource-stream.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
