//! Text-to-speech request handling

use super::error_utils::{error_from_response, transport_error};
use super::request_builder::{SPEECH_PATH, build_speech_body};
use super::response::{DEFAULT_AUDIO_MIME, SpeechAudio};
use super::types::GatewayClient;
use crate::config::ProviderKind;
use crate::error::GatewayResult;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

/// Fallback message for speech failures without a provider message
pub const SPEECH_FALLBACK: &str = "Failed to generate speech";

impl GatewayClient {
    /// Synthesize speech for `text` and return the audio payload.
    #[instrument(skip(self, text), fields(provider = %self.config.provider.kind, operation = "speech"))]
    pub async fn generate_speech(&self, text: &str) -> GatewayResult<SpeechAudio> {
        let text = self.admit(text)?;
        let body = build_speech_body(&self.config.provider, &text);

        let response = self
            .post(SPEECH_PATH)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e, SPEECH_FALLBACK))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, SPEECH_FALLBACK).await);
        }

        // OpenAI is asked for mp3; other providers say what they sent
        let mime_type = match self.config.provider.kind {
            ProviderKind::OpenAi => DEFAULT_AUDIO_MIME.to_string(),
            ProviderKind::StableLm => response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_AUDIO_MIME)
                .to_string(),
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&e, SPEECH_FALLBACK))?;

        debug!(bytes = bytes.len(), mime = %mime_type, "Speech audio received");
        Ok(SpeechAudio { bytes, mime_type })
    }
}
