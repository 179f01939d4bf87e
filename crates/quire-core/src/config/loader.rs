//! Configuration loading from files and the environment

use super::GatewayConfig;
use super::provider::{ProviderConfig, ProviderKind};
use crate::error::{GatewayError, GatewayResult};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Load configuration from a JSON file
///
/// Returns the default config if the file doesn't exist.
pub fn load_from_file(path: &Path) -> GatewayResult<GatewayConfig> {
    if !path.exists() {
        debug!("Config file '{}' not found, using defaults", path.display());
        return Ok(GatewayConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        GatewayError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        GatewayError::config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load configuration from process environment variables on top of defaults
pub fn load_from_env() -> GatewayResult<GatewayConfig> {
    let mut config = GatewayConfig::default();
    apply_env(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` resolves a variable name; empty values count as unset. The
/// provider switch is applied first so the endpoint/key pair is read for the
/// selected provider.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: F) -> GatewayResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(provider) = get("QUIRE_PROVIDER") {
        let kind: ProviderKind = provider.parse()?;
        if kind != config.provider.kind {
            // Endpoint and key of the previous provider do not carry over
            debug!("Provider switched to '{}' by QUIRE_PROVIDER", kind);
            config.provider = ProviderConfig::new(kind);
        }
    }

    let prefix = config.provider.kind.env_prefix();

    if let Some(base_url) = get(&format!("{}_API", prefix)) {
        config.provider.base_url = Some(base_url);
    }

    if let Some(api_key) = get(&format!("{}_API_KEY", prefix)) {
        config.provider.api_key = Some(api_key);
    }

    if let Some(max_requests) = get("QUIRE_MAX_REQUESTS") {
        config.rate_limit.max_requests = max_requests.parse().map_err(|_| {
            GatewayError::config(format!(
                "Invalid QUIRE_MAX_REQUESTS value '{}'",
                max_requests
            ))
        })?;
    }

    if let Some(window_ms) = get("QUIRE_WINDOW_MS") {
        let millis: u64 = window_ms.parse().map_err(|_| {
            GatewayError::config(format!("Invalid QUIRE_WINDOW_MS value '{}'", window_ms))
        })?;
        config.rate_limit.window = Duration::from_millis(millis);
    }

    Ok(())
}

/// Load the layered configuration: defaults, then `path` if given and
/// present, then `.env` and process environment.
///
/// The result is not validated; the client validates on construction.
pub fn load_config(path: Option<&Path>) -> GatewayResult<GatewayConfig> {
    load_config_with_provider(path, None)
}

/// Like [`load_config`], with an explicit provider choice that beats both
/// the file and `QUIRE_PROVIDER`.
///
/// Switching provider drops the file's endpoint, key and models, since they
/// belong to the other provider.
pub fn load_config_with_provider(
    path: Option<&Path>,
    provider: Option<ProviderKind>,
) -> GatewayResult<GatewayConfig> {
    // A missing .env file is normal
    let _ = dotenv::dotenv();

    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => GatewayConfig::default(),
    };

    match provider {
        Some(kind) => {
            if kind != config.provider.kind {
                config.provider = ProviderConfig::new(kind);
            }
            apply_env(&mut config, |key| match key {
                "QUIRE_PROVIDER" => None,
                _ => std::env::var(key).ok(),
            })?;
        }
        None => apply_env(&mut config, |key| std::env::var(key).ok())?,
    }

    Ok(config)
}
