//! Error types for the remote adapter.

use thiserror::Error;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur talking to the remote store.
///
/// The coordinator does not distinguish variants - any `RemoteError` means
/// "remote unavailable, fall back to local". The variants exist so logs
/// tell an operator what actually happened.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The adapter was started without credentials and refuses every call.
    #[error("remote store disabled: missing credentials")]
    Disabled,

    /// Transport-level failure (network unreachable, timeout, 5xx).
    #[error("http error: {message}")]
    Http {
        /// Human-readable failure description.
        message: String,
        /// Whether a later identical call could plausibly succeed.
        retryable: bool,
    },

    /// The service rejected the credentials.
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// A unique constraint was violated (duplicate email or username).
    #[error("unique constraint violated: {0}")]
    Constraint(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Creates a retryable transport error.
    pub fn http_retryable(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn http_fatal(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if a later identical call could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, RemoteError::Http { retryable: true, .. })
    }
}
