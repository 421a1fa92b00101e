//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found on the backend.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend refused the request.
    #[error("Backend rejected the request ({status}): {message}")]
    Backend {
        /// HTTP status returned by the backend.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The backend could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a body that could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the stable error code used in logs and CLI output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Backend { .. } => "BACKEND_REJECTED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Returns true if a user-initiated retry may succeed unchanged.
    ///
    /// Nothing retries automatically. The CLI uses this to choose between
    /// "try again" and "fix the request" when a save fails.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(status: u16) -> AppError {
        AppError::Backend {
            status,
            message: "msg".into(),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(backend(400).error_code(), "BACKEND_REJECTED");
        assert_eq!(
            AppError::Transport(String::new()).error_code(),
            "TRANSPORT_ERROR"
        );
        assert_eq!(AppError::Decode(String::new()).error_code(), "DECODE_ERROR");
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(AppError::Transport("timeout".into()).is_retryable());
        assert!(backend(503).is_retryable());
        assert!(!backend(400).is_retryable());
        assert!(!backend(404).is_retryable());
        assert!(!AppError::NotFound("gone".into()).is_retryable());
        assert!(!AppError::Decode("bad".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            backend(409).to_string(),
            "Backend rejected the request (409): msg"
        );
        assert_eq!(
            AppError::Transport("msg".into()).to_string(),
            "Transport error: msg"
        );
    }
}
