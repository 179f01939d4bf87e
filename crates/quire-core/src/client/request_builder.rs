//! Request bodies for each provider profile

use super::response::ResponseFormat;
use crate::config::{ProviderConfig, ProviderKind};
use serde_json::{Value, json};

/// Path of the chat completions endpoint
pub const CHAT_PATH: &str = "/chat/completions";
/// Path of the speech endpoint
pub const SPEECH_PATH: &str = "/audio/speech";
/// Path of the image generation endpoint
pub const IMAGE_PATH: &str = "/images/generations";

/// Token cap the StableLM profile sends with every chat request
const STABLE_LM_MAX_TOKENS: u32 = 200;

/// Build a chat completion request body.
///
/// `stream` adds `"stream": true`; JSON mode adds `response_format`.
pub fn build_chat_body(
    provider: &ProviderConfig,
    prompt: &str,
    format: ResponseFormat,
    stream: bool,
) -> Value {
    let mut body = json!({
        "model": provider.chat_model(),
        "messages": [{ "role": "user", "content": prompt }],
    });

    if provider.kind == ProviderKind::StableLm {
        body["max_tokens"] = json!(STABLE_LM_MAX_TOKENS);
    }

    if format == ResponseFormat::JsonObject {
        body["response_format"] = json!({ "type": "json_object" });
    }

    if stream {
        body["stream"] = json!(true);
    }

    body
}

/// Build a text-to-speech request body
pub fn build_speech_body(provider: &ProviderConfig, text: &str) -> Value {
    match provider.kind {
        ProviderKind::OpenAi => json!({
            "model": provider.speech_model(),
            "input": text,
            "voice": provider.voice(),
            "response_format": "mp3",
        }),
        ProviderKind::StableLm => json!({
            "text": text,
            "voice_id": provider.voice(),
        }),
    }
}

/// Build an image generation request body
pub fn build_image_body(provider: &ProviderConfig, description: &str) -> Value {
    match provider.kind {
        ProviderKind::OpenAi => json!({
            "model": provider.image_model(),
            "prompt": description,
            "n": 1,
            "size": "1024x1024",
        }),
        ProviderKind::StableLm => json!({
            "text_prompts": [{ "text": description }],
            "cfg_scale": 7,
            "height": 512,
            "width": 512,
            "steps": 30,
            "samples": 1,
        }),
    }
}
