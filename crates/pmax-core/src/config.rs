// ── Runtime connection configuration ──
//
// Describes *how* to reach one panel through the vendor cloud. Carries
// credential data and polling tuning, but never touches disk -- the
// CLI (or another host) constructs a `PanelConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use pmax_api::{Credentials, TransportConfig};

/// The vendor's hosted API root for this panel family.
pub const DEFAULT_BASE_URL: &str = "https://visonic.stl.nu/rest_api/7.0";

/// Default polling interval for the background refresh task.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Configuration for monitoring a single panel.
///
/// Built by the host, passed to [`Monitor`](crate::Monitor) -- core
/// never reads config files.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Versioned API root.
    pub base_url: Url,
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: SecretString,
    /// Panel user code.
    pub user_code: SecretString,
    /// Installation identifier registered with the vendor.
    pub app_id: String,
    /// Panel serial, e.g. `1B7EEB`.
    pub panel_serial: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Background refresh interval in seconds. 0 = no background task.
    pub poll_interval_secs: u64,
    /// Total attempts for an authenticated request.
    pub retry_attempts: u32,
    /// Fixed sleep between failed attempts.
    pub retry_backoff: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.parse().expect("default base URL"),
            email: String::new(),
            password: SecretString::from(String::new()),
            user_code: SecretString::from(String::new()),
            app_id: String::new(),
            panel_serial: String::new(),
            timeout: pmax_api::DEFAULT_TIMEOUT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            retry_attempts: pmax_api::DEFAULT_RETRY_ATTEMPTS,
            retry_backoff: pmax_api::DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl PanelConfig {
    /// The credential bundle for the API client.
    pub(crate) fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
            app_id: self.app_id.clone(),
            user_code: self.user_code.clone(),
            panel_serial: self.panel_serial.clone(),
        }
    }

    /// The transport tuning for the API client.
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            retry_attempts: self.retry_attempts,
            retry_backoff: self.retry_backoff,
        }
    }
}
