//! Gateway client constructor

use super::types::GatewayClient;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::limiter::SlidingWindowRateLimiter;
use reqwest::Client;
use tracing::debug;

impl GatewayClient {
    /// Create a new gateway client.
    ///
    /// The limiter is passed in rather than created here: hand the same
    /// limiter (or a clone) to several clients to share one quota.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if:
    /// - Configuration validation fails (missing key, bad URL, zero limits)
    /// - HTTP client creation fails
    pub fn new(config: GatewayConfig, limiter: SlidingWindowRateLimiter) -> GatewayResult<Self> {
        config.validate()?;

        let mut builder = Client::builder().connect_timeout(config.network.connect_timeout());
        if let Some(timeout) = config.network.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_http_client(config, limiter, http))
    }

    /// Create a client around an existing `reqwest::Client`.
    ///
    /// The configuration is not validated and its network settings are
    /// ignored.
    pub fn with_http_client(
        config: GatewayConfig,
        limiter: SlidingWindowRateLimiter,
        http: Client,
    ) -> Self {
        debug!(
            "Created gateway client for provider '{}' at {} (limit {} per {}ms)",
            config.provider.kind,
            config.provider.base_url(),
            limiter.config().max_requests,
            limiter.config().window.as_millis()
        );

        Self {
            config,
            http,
            limiter,
        }
    }
}
