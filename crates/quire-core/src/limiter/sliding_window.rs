//! Sliding window rate limiter

use super::types::RateLimitConfig;
use crate::error::GatewayResult;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Sliding window rate limiter
///
/// Counts requests recorded within the trailing `window` of the current
/// instant, independent of any wall-clock bucket alignment. Entries whose
/// age reaches `window` are pruned before every admission check.
///
/// Cloning shares the request log, so clones draw on the same quota. Build
/// separate instances for independent quotas.
///
/// Time comes from [`tokio::time::Instant`], so a paused tokio clock drives
/// the window in tests.
#[derive(Debug, Clone)]
pub struct SlidingWindowRateLimiter {
    config: RateLimitConfig,
    /// Request timestamps, oldest first
    timestamps: Arc<Mutex<VecDeque<Instant>>>,
}

impl Default for SlidingWindowRateLimiter {
    fn default() -> Self {
        Self::from_valid(RateLimitConfig::default())
    }
}

impl SlidingWindowRateLimiter {
    /// Create a limiter, rejecting a zero limit or a zero window
    pub fn new(config: RateLimitConfig) -> GatewayResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: RateLimitConfig) -> Self {
        Self {
            timestamps: Arc::new(Mutex::new(VecDeque::with_capacity(
                config.max_requests as usize,
            ))),
            config,
        }
    }

    /// Get the limiter configuration
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Drop every entry whose age has reached the window
    fn prune(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) >= self.config.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Prune stale entries, then report whether a request would be admitted.
    ///
    /// Does not record anything. Pair with [`record_request`] only where no
    /// other caller can interleave; otherwise use [`try_acquire`].
    ///
    /// [`record_request`]: Self::record_request
    /// [`try_acquire`]: Self::try_acquire
    pub fn can_make_request(&self) -> bool {
        let mut timestamps = self.timestamps.lock();
        self.prune(&mut timestamps, Instant::now());
        timestamps.len() < self.config.max_requests as usize
    }

    /// Record one outbound request at the current instant
    pub fn record_request(&self) {
        self.timestamps.lock().push_back(Instant::now());
    }

    /// Atomically check admission and record the request.
    ///
    /// Returns `false` without touching the log when the window is full.
    pub fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut timestamps = self.timestamps.lock();
        self.prune(&mut timestamps, now);

        if timestamps.len() < self.config.max_requests as usize {
            timestamps.push_back(now);
            debug!(
                "Rate limiter: admitted request, {}/{} in window",
                timestamps.len(),
                self.config.max_requests
            );
            true
        } else {
            warn!(
                "Rate limiter: rejected request, {} requests in the last {}ms",
                timestamps.len(),
                self.config.window.as_millis()
            );
            false
        }
    }

    /// Number of requests inside the current window
    pub fn current_count(&self) -> usize {
        let mut timestamps = self.timestamps.lock();
        self.prune(&mut timestamps, Instant::now());
        timestamps.len()
    }

    /// Time until the next request would be admitted, or `None` if it would
    /// be admitted now
    pub fn time_until_available(&self) -> Option<Duration> {
        let now = Instant::now();
        let mut timestamps = self.timestamps.lock();
        self.prune(&mut timestamps, now);

        let max = self.config.max_requests as usize;
        if timestamps.len() < max {
            return None;
        }
        // Admission reopens once this entry ages out
        timestamps
            .get(timestamps.len() - max)
            .map(|&entry| self.config.window - now.saturating_duration_since(entry))
    }
}
