//! Gateway client implementation
//!
//! One [`GatewayClient`] type serves every provider profile. Each wrapper
//! validates its input, takes a slot from the shared
//! [`SlidingWindowRateLimiter`](crate::limiter::SlidingWindowRateLimiter),
//! and makes exactly one outbound request.

mod admission;
mod chat;
mod constructor;
pub(crate) mod error_utils;
mod image;
mod request_builder;
mod response;
mod speech;
mod streaming;
#[cfg(test)]
mod tests;
mod types;

pub use chat::CHAT_FALLBACK;
pub use error_utils::sanitize_provider_error_text;
pub use image::IMAGE_FALLBACK;
pub use request_builder::{
    CHAT_PATH, IMAGE_PATH, SPEECH_PATH, build_chat_body, build_image_body, build_speech_body,
};
pub use response::{ChatCompletion, DEFAULT_AUDIO_MIME, ImageGeneration, ResponseFormat, SpeechAudio};
pub use speech::SPEECH_FALLBACK;
pub use types::GatewayClient;
