//! Upstream error extraction and sanitization helpers.

use crate::error::GatewayError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

const MAX_ERROR_TEXT_CHARS: usize = 1_024;
const REDACTED: &str = "[REDACTED]";

static BEARER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bBearer\s+[A-Za-z0-9._\-+/=]{8,}").expect("valid bearer token regex")
});

static KEY_VALUE_SECRET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(api[_-]?key|access[_-]?token|refresh[_-]?token|token|secret|password|authorization|x-api-key)\b\s*[:=]\s*["']?[^"',\s}]+"#,
    )
    .expect("valid key/value secret regex")
});

static SECRET_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bsk-[A-Za-z0-9_\-]{8,}").expect("valid secret key regex")
});

/// Sanitize a provider error body by redacting secrets and truncating large payloads.
pub fn sanitize_provider_error_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty error response body>".to_string();
    }

    if let Ok(mut json) = serde_json::from_str::<Value>(trimmed) {
        redact_json_value(&mut json);
        let serialized =
            serde_json::to_string(&json).unwrap_or_else(|_| "<unserializable error>".to_string());
        return truncate_with_suffix(serialized);
    }

    truncate_with_suffix(redact_inline_secrets(trimmed))
}

/// Pull the human-readable message out of a provider error body.
///
/// Looks at `error.message`, then a string `error`, then top-level
/// `message`. The result is sanitized.
pub fn extract_provider_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body.trim()).ok()?;

    let message = json["error"]["message"]
        .as_str()
        .or_else(|| json["error"].as_str())
        .or_else(|| json["message"].as_str())?
        .trim();

    if message.is_empty() {
        return None;
    }
    Some(truncate_with_suffix(redact_inline_secrets(message)))
}

/// Build an upstream error from a non-success HTTP response.
///
/// The provider's own message wins; `fallback` is used when the body has none.
pub async fn error_from_response(response: reqwest::Response, fallback: &str) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    warn!(
        status = status.as_u16(),
        body = %sanitize_provider_error_text(&body),
        "Upstream request failed"
    );

    let message = extract_provider_message(&body).unwrap_or_else(|| fallback.to_string());
    GatewayError::upstream(status.as_u16(), message)
}

/// Build an upstream error from a transport or decode failure.
///
/// No response means status 500 unless reqwest recorded one.
pub fn transport_error(err: &reqwest::Error, fallback: &str) -> GatewayError {
    let reason = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_decode() || err.is_body() {
        "invalid response body"
    } else {
        "transport error"
    };

    warn!(
        error = %truncate_with_suffix(redact_inline_secrets(&err.to_string())),
        "{}", fallback
    );

    let status = err.status().map(|s| s.as_u16()).unwrap_or(500);
    GatewayError::upstream(status, format!("{} ({})", fallback, reason))
}

fn redact_json_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if is_sensitive_key(key) {
                    *val = Value::String(REDACTED.to_string());
                } else {
                    redact_json_value(val);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                redact_json_value(item);
            }
        }
        Value::String(s) => {
            *s = redact_inline_secrets(s);
        }
        _ => {}
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.to_ascii_lowercase().replace(['-', ' '], "_");
    normalized.contains("api_key")
        || normalized.contains("token")
        || normalized.contains("secret")
        || normalized.contains("password")
        || normalized.contains("authorization")
        || normalized.contains("cookie")
        || normalized.contains("private_key")
}

fn redact_inline_secrets(input: &str) -> String {
    let redacted_bearer = BEARER_TOKEN_RE.replace_all(input, "Bearer [REDACTED]");
    let redacted_pairs = KEY_VALUE_SECRET_RE.replace_all(&redacted_bearer, "$1=[REDACTED]");
    SECRET_KEY_RE
        .replace_all(&redacted_pairs, REDACTED)
        .into_owned()
}

fn truncate_with_suffix(input: String) -> String {
    let char_count = input.chars().count();
    if char_count <= MAX_ERROR_TEXT_CHARS {
        return input;
    }

    let truncated: String = input.chars().take(MAX_ERROR_TEXT_CHARS).collect();
    format!(
        "{}... [truncated {} chars]",
        truncated,
        char_count - MAX_ERROR_TEXT_CHARS
    )
}
