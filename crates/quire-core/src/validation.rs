//! Input validation for gateway requests
//!
//! Runs before the rate limiter, so rejected input never spends quota.

use crate::error::{GatewayError, GatewayResult};

/// Maximum accepted input length, in characters, shared by every operation
pub const MAX_INPUT_LENGTH: usize = 1000;

/// Validate request text and return it trimmed.
///
/// Rules, in order:
/// 1. missing or empty text is rejected
/// 2. text longer than [`MAX_INPUT_LENGTH`] characters is rejected
/// 3. surrounding whitespace is removed; whitespace-only text is rejected
///
/// The length limit applies to the text as given, before trimming.
///
/// # Examples
///
/// ```
/// use quire_core::validation::validate_input;
///
/// assert_eq!(validate_input(Some("  hello ")).unwrap(), "hello");
/// assert!(validate_input(Some("")).is_err());
/// assert!(validate_input(None).is_err());
/// ```
pub fn validate_input(text: Option<&str>) -> GatewayResult<String> {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(GatewayError::invalid_input("Input text is required")),
    };

    if text.chars().count() > MAX_INPUT_LENGTH {
        return Err(GatewayError::invalid_input(format!(
            "Input text must not exceed {} characters",
            MAX_INPUT_LENGTH
        )));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::invalid_input("Input text is required"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_input_rejected() {
        let err = validate_input(Some("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Input text is required");
    }

    #[test]
    fn test_missing_input_rejected() {
        let err = validate_input(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_too_long_input_rejected() {
        let long_text = "a".repeat(1001);
        let err = validate_input(Some(&long_text)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "Input text must not exceed 1000 characters");
    }

    #[test]
    fn test_limit_is_inclusive() {
        let text = "a".repeat(1000);
        assert_eq!(validate_input(Some(&text)).unwrap().len(), 1000);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 1000 two-byte characters
        let text = "é".repeat(1000);
        assert!(validate_input(Some(&text)).is_ok());
        let text = "é".repeat(1001);
        assert!(validate_input(Some(&text)).is_err());
    }

    #[test]
    fn test_valid_input_trimmed() {
        assert_eq!(validate_input(Some("hello")).unwrap(), "hello");
        assert_eq!(validate_input(Some("\n  dear diary \t")).unwrap(), "dear diary");
    }

    #[test]
    fn test_whitespace_only_rejected() {
        let err = validate_input(Some("   \n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
