//! Request lifecycle logging
//!
//! Every transport reports the same three lifecycle lines: a request starts,
//! a request is cancelled, a request completes with a status. They go through
//! `tracing` under the [`LOG_TARGET`] target and can be switched off globally
//! with [`set_request_logging`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// `tracing` target used for lifecycle events.
pub const LOG_TARGET: &str = "photonai::request";

static REQUEST_LOGGING: AtomicBool = AtomicBool::new(true);

/// Enable or disable lifecycle logging for the whole process.
pub fn set_request_logging(enabled: bool) {
    REQUEST_LOGGING.store(enabled, Ordering::Relaxed);
}

/// Whether lifecycle logging is currently enabled.
pub fn request_logging_enabled() -> bool {
    REQUEST_LOGGING.load(Ordering::Relaxed)
}

/// Log a request being started
pub fn log_start(url: &str) {
    if request_logging_enabled() {
        debug!(target: LOG_TARGET, url = %url, "start request {}", url);
    }
}

/// Log a request being cancelled
pub fn log_cancel(url: &str) {
    if request_logging_enabled() {
        info!(target: LOG_TARGET, url = %url, "cancel on request {}", url);
    }
}

/// Log a request reaching its final status
pub fn log_complete(url: &str, status: Option<u16>, elapsed: Duration) {
    if request_logging_enabled() {
        info!(
            target: LOG_TARGET,
            url = %url,
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "complete, status code: {:?}",
            status
        );
    }
}

/// Marks a single-shot call as in flight.
///
/// Dropping it before [`finish`](Self::finish) means the caller abandoned the
/// call, which is logged as a cancellation.
#[derive(Debug)]
pub(crate) struct InFlight {
    url: String,
    armed: bool,
}

impl InFlight {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            armed: true,
        }
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// The call ran to an outcome; nothing is logged on drop.
    pub(crate) fn finish(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.armed {
            log_cancel(&self.url);
        }
    }
}

/// Per-stream bookkeeping for lifecycle logging.
#[derive(Debug)]
pub struct StreamContext {
    url: String,
    started: Instant,
    /// Events delivered to the consumer so far
    pub event_count: u64,
}

impl StreamContext {
    /// Start tracking a stream
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            started: Instant::now(),
            event_count: 0,
        }
    }

    /// URL the stream was opened against
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Time since the stream was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Record one delivered event
    pub fn log_event(&mut self) {
        self.event_count += 1;
        if request_logging_enabled() {
            debug!(
                target: LOG_TARGET,
                url = %self.url,
                event_num = self.event_count,
                "Stream event received"
            );
        }
    }

    /// Log the stream ending normally
    pub fn log_finished(&self) {
        if request_logging_enabled() {
            debug!(
                target: LOG_TARGET,
                url = %self.url,
                event_count = self.event_count,
                elapsed_ms = self.elapsed().as_millis(),
                "Stream finished"
            );
        }
    }

    /// Log the stream ending with an error
    pub fn log_error(&self, error: &str) {
        if request_logging_enabled() {
            warn!(
                target: LOG_TARGET,
                url = %self.url,
                event_count = self.event_count,
                elapsed_ms = self.elapsed().as_millis(),
                error = %error,
                "Stream error"
            );
        }
    }
}

/// Serializes tests that depend on the global logging switch.
#[cfg(test)]
pub(crate) static LOGGING_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
