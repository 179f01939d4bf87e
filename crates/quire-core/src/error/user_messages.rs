//! User-friendly error messages and classification
//!
//! Front-ends render these instead of the raw error. Cancellation has no
//! user-facing form: a cancelled request is something the user asked for.

use super::types::GatewayError;

/// Error category for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration issues
    Configuration,
    /// Authentication/authorization failures
    Authentication,
    /// Rate limiting / quota exceeded
    RateLimit,
    /// Network connectivity issues
    Network,
    /// Invalid user input
    UserInput,
    /// Provider-side failures
    Provider,
}

impl ErrorCategory {
    /// Get a user-friendly category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration Error",
            Self::Authentication => "Authentication Error",
            Self::RateLimit => "Rate Limit Exceeded",
            Self::Network => "Network Error",
            Self::UserInput => "Invalid Input",
            Self::Provider => "Provider Error",
        }
    }
}

/// User-friendly error information
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    /// The error category
    pub category: ErrorCategory,
    /// Detailed user-friendly message
    pub message: String,
    /// Suggested action, if there is an obvious one
    pub suggestion: Option<String>,
}

impl UserFriendlyError {
    fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Build the user-facing form of an error.
    ///
    /// Returns `None` for [`GatewayError::Cancelled`], which callers must not
    /// surface as a failure.
    pub fn from_error(error: &GatewayError) -> Option<Self> {
        let friendly = match error {
            GatewayError::Cancelled => return None,
            GatewayError::InvalidInput { message } => {
                Self::new(ErrorCategory::UserInput, message.clone())
            }
            GatewayError::RateLimited { message } => Self::new(ErrorCategory::RateLimit, message.clone())
                .with_suggestion("Wait a moment before sending another request"),
            GatewayError::Config { message } => Self::new(ErrorCategory::Configuration, message.clone())
                .with_suggestion("Check the API endpoint and key settings"),
            GatewayError::Upstream { status, message } => match status {
                401 | 403 => Self::new(ErrorCategory::Authentication, message.clone())
                    .with_suggestion("Verify that the API key is valid"),
                429 => Self::new(ErrorCategory::RateLimit, message.clone())
                    .with_suggestion("The provider is throttling requests; try again later"),
                500 => Self::new(ErrorCategory::Network, message.clone()),
                _ => Self::new(ErrorCategory::Provider, message.clone()),
            },
        };
        Some(friendly)
    }

    /// Format the error for display
    pub fn format_display(&self) -> String {
        match &self.suggestion {
            Some(suggestion) => format!(
                "{}: {}\n  hint: {}",
                self.category.display_name(),
                self.message,
                suggestion
            ),
            None => format!("{}: {}", self.category.display_name(), self.message),
        }
    }
}

impl GatewayError {
    /// Message to show the user, or `None` when nothing should be shown.
    pub fn user_message(&self) -> Option<String> {
        UserFriendlyError::from_error(self).map(|friendly| friendly.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_suppressed() {
        assert!(GatewayError::cancelled().user_message().is_none());
        assert!(UserFriendlyError::from_error(&GatewayError::Cancelled).is_none());
    }

    #[test]
    fn test_rate_limited_message() {
        let err = GatewayError::rate_limited();
        assert_eq!(
            err.user_message().as_deref(),
            Some("Rate limit exceeded. Please try again later.")
        );
        let friendly = UserFriendlyError::from_error(&err).unwrap();
        assert_eq!(friendly.category, ErrorCategory::RateLimit);
        assert!(friendly.suggestion.is_some());
    }

    #[test]
    fn test_upstream_auth_category() {
        let err = GatewayError::upstream(401, "Incorrect API key provided");
        let friendly = UserFriendlyError::from_error(&err).unwrap();
        assert_eq!(friendly.category, ErrorCategory::Authentication);
        assert!(friendly.format_display().starts_with("Authentication Error"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::invalid_input("x").status(), 400);
        assert_eq!(GatewayError::rate_limited().status(), 429);
        assert_eq!(GatewayError::upstream(503, "down").status(), 503);
        assert_eq!(GatewayError::upstream_default("boom").status(), 500);
        assert_eq!(GatewayError::cancelled().status(), 499);
    }

    #[test]
    fn test_retryable() {
        assert!(GatewayError::rate_limited().is_retryable());
        assert!(GatewayError::upstream(502, "bad gateway").is_retryable());
        assert!(!GatewayError::upstream(400, "bad request").is_retryable());
        assert!(!GatewayError::invalid_input("empty").is_retryable());
        assert!(!GatewayError::cancelled().is_retryable());
    }
}
