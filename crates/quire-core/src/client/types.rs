//! Gateway client type definitions

use crate::config::{GatewayConfig, ProviderKind};
use crate::limiter::SlidingWindowRateLimiter;
use reqwest::Client;

/// Client for the completion, speech and image endpoints of one provider.
///
/// Every wrapper call follows the same path: validate the input, take a slot
/// from the rate limiter, then make exactly one HTTP request. Rejected calls
/// never reach the network and never consume quota.
///
/// Cloning is cheap; clones share the HTTP connection pool and the limiter
/// quota.
///
/// # Examples
///
/// ```no_run
/// use quire_core::client::{GatewayClient, ResponseFormat};
/// use quire_core::config::{GatewayConfig, ProviderConfig, ProviderKind};
/// use quire_core::limiter::SlidingWindowRateLimiter;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GatewayConfig::new(
///     ProviderConfig::new(ProviderKind::OpenAi).with_api_key("your-api-key"),
/// );
/// let client = GatewayClient::new(config, SlidingWindowRateLimiter::default())?;
///
/// let completion = client
///     .chat_completion("What is the capital of France?", ResponseFormat::Text)
///     .await?;
/// println!("{}", completion.content().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GatewayClient {
    pub(super) config: GatewayConfig,
    pub(super) http: Client,
    pub(super) limiter: SlidingWindowRateLimiter,
}

impl GatewayClient {
    /// Get the client configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Get the provider profile in use
    pub fn provider(&self) -> ProviderKind {
        self.config.provider.kind
    }

    /// Get the limiter guarding this client
    pub fn limiter(&self) -> &SlidingWindowRateLimiter {
        &self.limiter
    }

    /// Absolute URL for an endpoint path
    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.provider.base_url(), path)
    }

    /// POST request with the provider's bearer credentials
    pub(super) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.http.post(self.endpoint(path));
        match self.config.provider.api_key() {
            Some(api_key) => request.bearer_auth(api_key),
            None => request,
        }
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("provider", &self.config.provider.kind)
            .field("base_url", &self.config.provider.base_url())
            .field("rate_limit", self.limiter.config())
            .finish_non_exhaustive()
    }
}
