//! Response types returned by the gateway wrappers

use crate::error::{GatewayError, GatewayResult};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MIME type assumed for speech audio when the provider does not say
pub const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

/// Requested shape of a chat completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// JSON mode: the model must answer with a JSON object
    JsonObject,
}

/// Provider chat completion, kept as the provider sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatCompletion(Value);

impl ChatCompletion {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Text of `choices[0].message.content`, if present
    pub fn content(&self) -> Option<&str> {
        self.0["choices"][0]["message"]["content"].as_str()
    }

    /// Parse the message content as JSON, for JSON-mode completions.
    ///
    /// Missing or unparseable content is an upstream failure (502).
    pub fn parse_json_content<T: DeserializeOwned>(&self) -> GatewayResult<T> {
        let content = self
            .content()
            .ok_or_else(|| GatewayError::upstream(502, "Completion has no message content"))?;

        serde_json::from_str(content).map_err(|e| {
            GatewayError::upstream(502, format!("Completion content is not valid JSON: {}", e))
        })
    }

    /// The provider's JSON as received
    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }
}

/// Synthesized audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl SpeechAudio {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Provider image generation result, kept as the provider sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageGeneration(Value);

impl ImageGeneration {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Hosted image URLs (`data[].url`)
    pub fn urls(&self) -> Vec<&str> {
        self.0["data"]
            .as_array()
            .map(|items| items.iter().filter_map(|item| item["url"].as_str()).collect())
            .unwrap_or_default()
    }

    /// Inline base64 images (`artifacts[].base64` or `data[].b64_json`)
    pub fn base64_images(&self) -> Vec<&str> {
        let artifacts = self.0["artifacts"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|item| item["base64"].as_str());
        let inline = self.0["data"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|item| item["b64_json"].as_str());
        artifacts.chain(inline).collect()
    }

    /// The provider's JSON as received
    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Answer {
        mood: String,
    }

    #[test]
    fn test_completion_content() {
        let completion = ChatCompletion::new(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}]
        }));
        assert_eq!(completion.content(), Some("Hi there"));
        assert_eq!(ChatCompletion::new(json!({})).content(), None);
    }

    #[test]
    fn test_parse_json_content() {
        let completion = ChatCompletion::new(json!({
            "choices": [{"message": {"content": "{\"mood\":\"positive\"}"}}]
        }));
        let answer: Answer = completion.parse_json_content().unwrap();
        assert_eq!(answer.mood, "positive");
    }

    #[test]
    fn test_parse_json_content_failure_is_502() {
        let completion = ChatCompletion::new(json!({
            "choices": [{"message": {"content": "not json"}}]
        }));
        let err = completion.parse_json_content::<Answer>().unwrap_err();
        assert_eq!(err.status(), 502);

        let empty = ChatCompletion::new(json!({"choices": []}));
        assert_eq!(empty.parse_json_content::<Answer>().unwrap_err().status(), 502);
    }

    #[test]
    fn test_image_accessors() {
        let openai = ImageGeneration::new(json!({"data": [{"url": "https://img/1.png"}]}));
        assert_eq!(openai.urls(), vec!["https://img/1.png"]);
        assert!(openai.base64_images().is_empty());

        let stable = ImageGeneration::new(json!({"artifacts": [{"base64": "iVBOR", "seed": 1}]}));
        assert!(stable.urls().is_empty());
        assert_eq!(stable.base64_images(), vec!["iVBOR"]);
    }

    #[test]
    fn test_response_format_serde() {
        assert_eq!(
            serde_json::to_string(&ResponseFormat::JsonObject).unwrap(),
            "\"json_object\""
        );
    }
}
