//! Rate limiting for outbound gateway calls
//!
//! A sliding window limiter bounds outbound requests to `max_requests` per
//! rolling window (15 per minute by default). The limiter is built
//! explicitly and passed into the client, so each quota is an ordinary value.

mod sliding_window;
mod types;


pub use sliding_window::SlidingWindowRateLimiter;
pub use types::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS, RateLimitConfig};
