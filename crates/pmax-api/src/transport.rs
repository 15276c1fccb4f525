// Transport configuration
//
// Builds the `reqwest::Client` used for every call to the cloud API.
// The vendor's endpoints are picky about the mobile-client headers, so
// they are pinned here and sent on every request.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::Error;

/// The mobile client string the vendor's servers expect.
pub const VENDOR_USER_AGENT: &str = "Visonic GO/2.8.62.91 CFNetwork/901.1 Darwin/17.6.0";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default total attempt budget for an authenticated request.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default delay between failed attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Connection and retry tuning for a [`CloudClient`](crate::CloudClient).
///
/// The retry knobs are deliberately configurable: production uses the
/// defaults, tests shrink the backoff to keep the suite fast.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Total attempts for an authenticated request (not "extra retries":
    /// a budget of 3 means at most 3 sends).
    pub retry_attempts: u32,
    /// Fixed sleep between failed attempts. No exponential backoff --
    /// the polling host already spaces calls out.
    pub retry_backoff: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the vendor headers and timeout
    /// applied.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(VENDOR_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-us"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(Error::Transport)
    }
}
