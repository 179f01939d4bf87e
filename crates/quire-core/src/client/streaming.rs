//! Streaming chat completion

use super::request_builder::{CHAT_PATH, build_chat_body};
use super::response::ResponseFormat;
use super::types::GatewayClient;
use crate::error::GatewayResult;
use crate::streaming::ChatStream;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

impl GatewayClient {
    /// Start a streaming chat completion.
    ///
    /// Resolves once the provider has accepted the request; the returned
    /// stream then yields text fragments as they arrive. Cancelling `cancel`
    /// aborts the connection attempt or the pending read, and the stream
    /// yields a single `Cancelled` error.
    ///
    /// The call takes one limiter slot at admission, however long the stream
    /// runs.
    #[instrument(skip(self, prompt, cancel), fields(provider = %self.config.provider.kind, operation = "chat_stream"))]
    pub async fn chat_completion_stream(
        &self,
        prompt: &str,
        cancel: CancellationToken,
    ) -> GatewayResult<ChatStream> {
        let prompt = self.admit(prompt)?;
        let body = build_chat_body(&self.config.provider, &prompt, ResponseFormat::Text, true);

        ChatStream::open(self.post(CHAT_PATH).json(&body), cancel).await
    }
}
