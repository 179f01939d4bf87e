//! Quire Core Library
//!
//! A rate-limited client for hosted AI endpoints: chat completion (plain,
//! JSON mode and streamed), text-to-speech and image generation, plus the
//! diary features built on top of them.
//!
//! Every wrapper call is validated, then admitted by a shared
//! sliding-window rate limiter, then sent as exactly one HTTP request.
//! Streams are pull-based and cancellable.

pub mod cancellation;
pub mod client;
pub mod config;
pub mod diary;
pub mod error;
pub mod limiter;
pub mod streaming;
pub mod validation;

// Re-export commonly used types
pub use client::{ChatCompletion, GatewayClient, ImageGeneration, ResponseFormat, SpeechAudio};
pub use config::{GatewayConfig, ProviderConfig, ProviderKind, load_config};
pub use diary::{ChatBackend, DiaryEntry, Mood, MoodAnalysis, Note};
pub use error::{GatewayError, GatewayResult};
pub use limiter::{RateLimitConfig, SlidingWindowRateLimiter};
pub use streaming::{ChatStream, StreamState};
pub use tokio_util::sync::CancellationToken;
pub use validation::{MAX_INPUT_LENGTH, validate_input};
