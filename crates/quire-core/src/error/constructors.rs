//! Constructor methods for GatewayError

use super::types::GatewayError;

/// Message used for every local rate-limit rejection
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

impl GatewayError {
    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create the rate-limit rejection error
    pub fn rate_limited() -> Self {
        Self::RateLimited {
            message: RATE_LIMIT_MESSAGE.to_string(),
        }
    }

    /// Create an upstream failure with the provider's status
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create an upstream failure with no specific status (500)
    pub fn upstream_default(message: impl Into<String>) -> Self {
        Self::upstream(500, message)
    }

    /// Create the cancellation error
    pub fn cancelled() -> Self {
        Self::Cancelled
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

