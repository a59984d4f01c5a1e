//! Logging setup
//!
//! Request lifecycle events (`start request`, `cancel on request`,
//! `complete, status code`) are emitted by the transport layer under the
//! `photonai::request` target. This module re-exports the switch for them and,
//! with the `trace` feature, a helper that installs a subscriber.

pub use photonai_transport::observability::{
    LOG_TARGET, request_logging_enabled, set_request_logging,
};

/// Install a `tracing` subscriber that prints to stderr.
///
/// The filter is read from `RUST_LOG` and defaults to `photonai=info`. Does
/// nothing if a global subscriber is already installed.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photonai=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
