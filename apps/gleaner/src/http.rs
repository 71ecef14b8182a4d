//! # Outbound HTTP
//!
//! One place to build the `reqwest` clients used by the Gemini summarizer
//! and the remote store, so every outbound call carries a deadline.

use gleaner_core::GleanerError;
use std::time::Duration;

/// Upper bound on establishing a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a client whose requests fail after `timeout`.
///
/// The connect phase is bounded by the shorter of `timeout` and
/// `CONNECT_TIMEOUT`.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, GleanerError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .build()
        .map_err(|e| GleanerError::Config(format!("Cannot build HTTP client: {e}")))
}
