//! Core error types for the Quire gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Status-equivalent code for a request the caller cancelled.
///
/// Not a real HTTP status; mirrors the nginx "client closed request" code.
pub const STATUS_CANCELLED: u16 = 499;

/// Error kind, for callers that branch on the failure class only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected before any request was made
    InvalidInput,
    /// Local rate limiter refused admission
    RateLimited,
    /// The provider answered with a failure, or the transport failed
    UpstreamFailure,
    /// The caller's cancellation token fired
    Cancelled,
    /// Configuration could not be loaded or is invalid
    Config,
}

/// Main error type for the gateway client
///
/// Every wrapper operation fails with one of these variants. Each carries a
/// human readable message and maps to an HTTP-like status via
/// [`GatewayError::status`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Input failed validation (status 400)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Local rate limiter refused the request (status 429)
    #[error("{message}")]
    RateLimited { message: String },

    /// Provider reported a non-success status or the transport failed
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Request was cancelled by the caller (status 499)
    #[error("Request was cancelled")]
    Cancelled,

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GatewayError {
    /// HTTP-like status code for this error
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::RateLimited { .. } => 429,
            Self::Upstream { status, .. } => *status,
            Self::Cancelled => STATUS_CANCELLED,
            Self::Config { .. } => 500,
        }
    }

    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Upstream { .. } => ErrorKind::UpstreamFailure,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// The message without the variant prefix added by `Display`
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message }
            | Self::RateLimited { message }
            | Self::Upstream { message, .. }
            | Self::Config { message } => message,
            Self::Cancelled => "Request was cancelled",
        }
    }

    /// Whether this error came from a cancelled request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether issuing the same request again later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
