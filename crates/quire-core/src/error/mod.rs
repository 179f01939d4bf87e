//! Error types for the Quire gateway
//!
//! Every failure carries a kind, a human-readable message and an HTTP-like
//! status code:
//! - `InvalidInput` (400): rejected by the validator, nothing was sent
//! - `RateLimited` (429): rejected by the local limiter, nothing was sent
//! - `Upstream` (provider status, or 500): the provider or transport failed
//! - `Cancelled` (499): the caller's token fired; never shown to users

mod constructors;
mod types;
mod user_messages;

pub use constructors::RATE_LIMIT_MESSAGE;
pub use types::{ErrorKind, GatewayError, GatewayResult, STATUS_CANCELLED};
pub use user_messages::{ErrorCategory, UserFriendlyError};
