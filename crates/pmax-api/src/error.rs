// API error types
//
// Everything the HTTP layer can fail with. Domain-level consumers
// (pmax-core) translate these into their own vocabulary -- callers of
// this crate see HTTP status codes and reqwest errors, callers of the
// core crate do not.

use thiserror::Error;

/// Unified error type for the PowerManage API client.
#[derive(Debug, Error)]
pub enum Error {
    /// Either stage of the two-step login was rejected, or a login
    /// response could not be decoded.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Network-level failure: connect error, timeout, TLS, body read.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The retry budget ran out. Carries the failure from the final
    /// attempt.
    #[error("request failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<Error> },

    /// A response body did not match the expected shape.
    #[error("deserialization error: {message}")]
    Deserialization { message: String },

    /// The configured base URL or a joined endpoint path is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[source] url::ParseError),
}
