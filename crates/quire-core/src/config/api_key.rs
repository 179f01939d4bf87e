//! API key display helpers

/// Mask an API key for display, keeping a short prefix and suffix
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let len = chars.len();
    if len <= 12 {
        return "*".repeat(len);
    }

    let prefix: String = chars[..8].iter().collect();
    let suffix: String = chars[len - 4..].iter().collect();
    let mask_len = len - 12;

    format!("{}{}...{}", prefix, "*".repeat(mask_len.min(8)), suffix)
}

/// One-line key status for the CLI
pub fn format_api_key_status(provider: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("✓ {} API key: {}", provider, mask_api_key(key)),
        None => format!("✗ {} API key: not set", provider),
    }
}
