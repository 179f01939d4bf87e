//! Validate-then-limit admission shared by every wrapper

use super::types::GatewayClient;
use crate::error::{GatewayError, GatewayResult};
use crate::validation::validate_input;
use tracing::{debug, warn};

impl GatewayClient {
    /// Validate `input`, then take a limiter slot.
    ///
    /// Returns the trimmed input. Invalid input is rejected before the
    /// limiter is consulted, so it never uses up quota.
    pub(super) fn admit(&self, input: &str) -> GatewayResult<String> {
        let text = validate_input(Some(input))?;

        if !self.limiter.try_acquire() {
            warn!(
                provider = %self.config.provider.kind,
                retry_after_ms = self
                    .limiter
                    .time_until_available()
                    .map(|wait| wait.as_millis() as u64)
                    .unwrap_or_default(),
                "Request rejected by rate limiter"
            );
            return Err(GatewayError::rate_limited());
        }

        debug!(chars = text.chars().count(), "Request admitted");
        Ok(text)
    }
}
