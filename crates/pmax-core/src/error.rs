// ── Core error types ──
//
// User-facing errors from pmax-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures
// directly. The `From<pmax_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot connect to the panel cloud: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Panel cloud request timed out")]
    Timeout,

    #[error("Update failed: {message}")]
    UpdateFailed { message: String },

    #[error("Arm command rejected: {message}")]
    CommandRejected { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pmax_api::Error> for CoreError {
    fn from(err: pmax_api::Error) -> Self {
        match err {
            pmax_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            pmax_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::UpdateFailed {
                        message: e.to_string(),
                    }
                }
            }
            pmax_api::Error::Api { status, message } => CoreError::UpdateFailed {
                message: format!("HTTP {status}: {message}"),
            },
            err @ pmax_api::Error::RetriesExhausted { .. } => CoreError::UpdateFailed {
                message: err.to_string(),
            },
            pmax_api::Error::Deserialization { message } => CoreError::UpdateFailed { message },
            pmax_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
        }
    }
}
