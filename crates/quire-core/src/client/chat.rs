//! Chat completion request handling

use super::error_utils::{error_from_response, transport_error};
use super::request_builder::{CHAT_PATH, build_chat_body};
use super::response::{ChatCompletion, ResponseFormat};
use super::types::GatewayClient;
use crate::error::GatewayResult;
use serde_json::Value;
use tracing::{debug, instrument};

/// Fallback message for chat failures without a provider message
pub const CHAT_FALLBACK: &str = "Failed to get chat completion";

impl GatewayClient {
    /// Send a single-turn chat completion request.
    ///
    /// The prompt is sent as one user message. With
    /// [`ResponseFormat::JsonObject`] the provider is asked for a JSON object;
    /// read it back with [`ChatCompletion::parse_json_content`].
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the prompt is empty or longer than 1000 characters
    /// - `RateLimited` if the limiter window is full
    /// - `Upstream` if the provider rejects the request or the transport fails
    #[instrument(skip(self, prompt), fields(provider = %self.config.provider.kind, operation = "chat"))]
    pub async fn chat_completion(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> GatewayResult<ChatCompletion> {
        let prompt = self.admit(prompt)?;
        let body = build_chat_body(&self.config.provider, &prompt, format, false);

        let response = self
            .post(CHAT_PATH)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e, CHAT_FALLBACK))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, CHAT_FALLBACK).await);
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| transport_error(&e, CHAT_FALLBACK))?;

        debug!("Chat completion received");
        Ok(ChatCompletion::new(raw))
    }
}
