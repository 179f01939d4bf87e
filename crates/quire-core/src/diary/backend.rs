//! Completion source used by the diary features

use crate::client::{ChatCompletion, GatewayClient, ResponseFormat};
use crate::error::GatewayResult;
use async_trait::async_trait;

/// Anything that can answer a single-turn chat prompt
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Complete `prompt`, optionally in JSON mode
    async fn complete(&self, prompt: &str, format: ResponseFormat)
    -> GatewayResult<ChatCompletion>;
}

#[async_trait]
impl ChatBackend for GatewayClient {
    async fn complete(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> GatewayResult<ChatCompletion> {
        self.chat_completion(prompt, format).await
    }
}
