//! Gateway configuration
//!
//! Layered the usual way: built-in defaults, then an optional JSON file,
//! then environment variables (after loading `.env`).
//!
//! Environment variables:
//! - `QUIRE_PROVIDER`: `openai` or `stablelm`
//! - `OPENAI_API`, `OPENAI_API_KEY`: endpoint/key pair for OpenAI
//! - `STABLE_LM_API`, `STABLE_LM_API_KEY`: endpoint/key pair for StableLM
//! - `QUIRE_MAX_REQUESTS`, `QUIRE_WINDOW_MS`: rate limit override

mod api_key;
mod loader;
mod network;
mod provider;

pub use api_key::{format_api_key_status, mask_api_key};
pub use loader::{
    apply_env, load_config, load_config_with_provider, load_from_env, load_from_file,
};
pub use network::{DEFAULT_CONNECT_TIMEOUT_SECS, NetworkConfig};
pub use provider::{ModelOverrides, ProviderConfig, ProviderKind};

use crate::error::{GatewayError, GatewayResult};
use crate::limiter::RateLimitConfig;
use serde::{Deserialize, Serialize};

/// Complete gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl GatewayConfig {
    /// Create a config for the given provider with defaults elsewhere
    pub fn new(provider: ProviderConfig) -> Self {
        Self {
            provider,
            ..Default::default()
        }
    }

    /// Set rate limiting
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Check that the configuration can be used to build a client
    pub fn validate(&self) -> GatewayResult<()> {
        self.rate_limit.validate()?;
        self.provider.validate_models()?;

        let base_url = self.provider.base_url();
        reqwest::Url::parse(base_url).map_err(|e| {
            GatewayError::config(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        if self.provider.api_key().is_none() {
            return Err(GatewayError::config(format!(
                "Missing API key for provider '{}' (set {}_API_KEY)",
                self.provider.kind,
                self.provider.kind.env_prefix()
            )));
        }

        if self.network.connect_timeout_secs == 0 {
            return Err(GatewayError::config(
                "connect_timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }
}
