//! CLI error type and exit codes.

use thiserror::Error;

use pmax_core::CoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl CliError {
    /// Process exit code: 2 for config/usage problems, 3 for
    /// authentication rejections, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::Validation { .. } => 2,
            Self::Core(CoreError::AuthenticationFailed { .. }) => 3,
            _ => 1,
        }
    }
}
