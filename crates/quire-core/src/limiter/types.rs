//! Rate limiter configuration

use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of requests admitted per window
pub const DEFAULT_MAX_REQUESTS: u32 = 15;

/// Default window length in milliseconds
pub const DEFAULT_WINDOW_MS: u64 = 60_000;

/// Sliding window rate limit configuration
///
/// Immutable once handed to a limiter. Both values must be non-zero.
///
/// # Examples
///
/// ```
/// use quire_core::limiter::RateLimitConfig;
/// use std::time::Duration;
///
/// let config = RateLimitConfig::new(2, Duration::from_millis(1000));
/// assert!(config.validate().is_ok());
/// assert_eq!(RateLimitConfig::default().max_requests, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests admitted within any trailing window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Length of the trailing window
    #[serde(default = "default_window", rename = "window_ms", with = "duration_ms")]
    pub window: Duration,
}

fn default_max_requests() -> u32 {
    DEFAULT_MAX_REQUESTS
}
fn default_window() -> Duration {
    Duration::from_millis(DEFAULT_WINDOW_MS)
}

/// Serde support for Duration as whole milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: default_window(),
        }
    }
}

impl RateLimitConfig {
    /// Create a configuration with the given limit and window
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Create a configuration with the window given in milliseconds
    pub fn per_millis(max_requests: u32, window_ms: u64) -> Self {
        Self::new(max_requests, Duration::from_millis(window_ms))
    }

    /// Create a configuration admitting `max_requests` per minute
    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Check that both values are non-zero
    pub fn validate(&self) -> GatewayResult<()> {
        if self.max_requests == 0 {
            return Err(GatewayError::config(
                "Rate limit max_requests must be greater than zero",
            ));
        }
        if self.window.is_zero() {
            return Err(GatewayError::config(
                "Rate limit window must be greater than zero",
            ));
        }
        Ok(())
    }
}
