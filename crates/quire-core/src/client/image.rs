//! Image generation request handling

use super::error_utils::{error_from_response, transport_error};
use super::request_builder::{IMAGE_PATH, build_image_body};
use super::response::ImageGeneration;
use super::types::GatewayClient;
use crate::error::GatewayResult;
use serde_json::Value;
use tracing::{debug, instrument};

/// Fallback message for image failures without a provider message
pub const IMAGE_FALLBACK: &str = "Failed to generate image";

impl GatewayClient {
    /// Generate an image from a text description.
    #[instrument(skip(self, description), fields(provider = %self.config.provider.kind, operation = "image"))]
    pub async fn generate_image(&self, description: &str) -> GatewayResult<ImageGeneration> {
        let description = self.admit(description)?;
        let body = build_image_body(&self.config.provider, &description);

        let response = self
            .post(IMAGE_PATH)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e, IMAGE_FALLBACK))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, IMAGE_FALLBACK).await);
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| transport_error(&e, IMAGE_FALLBACK))?;

        debug!("Image generation received");
        Ok(ImageGeneration::new(raw))
    }
}
