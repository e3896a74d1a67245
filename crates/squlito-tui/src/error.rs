//! Error types for squlito-tui.

use std::io;

use squlito_core::AppError;
use squlito_core::error::ErrorSeverity;
use thiserror::Error;

/// TUI-specific error type.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal I/O error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Error from the core library (configuration, storage).
    #[error(transparent)]
    Core(#[from] AppError),

    /// Logging could not be set up.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

impl TuiError {
    /// Severity used as the prefix of the exit message.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TuiError::Core(e) => e.severity(),
            TuiError::Terminal(_) => ErrorSeverity::Critical,
            TuiError::Logging(_) => ErrorSeverity::High,
        }
    }

    /// Hint printed under the error on exit, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            TuiError::Core(e) => e.troubleshooting_hint(),
            TuiError::Logging(_) => Some("Check that the log file directory is writable".to_string()),
            TuiError::Terminal(_) => None,
        }
    }
}
