//! API resource endpoints
//!
//! Each resource is a typed façade over the client's
//! [`RequestHandler`](crate::handler::RequestHandler).

pub mod chat_completion;

pub use chat_completion::ChatCompletion;
