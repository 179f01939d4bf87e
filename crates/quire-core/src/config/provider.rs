//! Provider selection and per-provider settings

use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upstream API flavor
///
/// Both speak the same chat endpoint; they differ in default models and in
/// the body shapes of the speech and image endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI (`gpt-3.5-turbo`, `tts-1`, `dall-e-3`)
    #[default]
    OpenAi,
    /// Stability StableLM (`stable-lm-zephyr-3b`)
    StableLm,
}

impl ProviderKind {
    /// Provider name as used in config files and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::StableLm => "stablelm",
        }
    }

    /// Prefix of the `<PREFIX>_API` / `<PREFIX>_API_KEY` environment pair
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI",
            Self::StableLm => "STABLE_LM",
        }
    }

    /// Base URL used when none is configured
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::StableLm => "https://api.stability.ai/v1",
        }
    }

    /// Default chat completion model
    pub fn default_chat_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-3.5-turbo",
            Self::StableLm => "stable-lm-zephyr-3b",
        }
    }

    /// Default speech model, `None` when the speech body names no model
    pub fn default_speech_model(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("tts-1"),
            Self::StableLm => None,
        }
    }

    /// Default image model, `None` when the image body names no model
    pub fn default_image_model(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("dall-e-3"),
            Self::StableLm => None,
        }
    }

    /// Default speech voice
    pub fn default_voice(&self) -> &'static str {
        match self {
            Self::OpenAi => "alloy",
            Self::StableLm => "en-US-1",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "stablelm" | "stable-lm" | "stable_lm" => Ok(Self::StableLm),
            other => Err(GatewayError::config(format!(
                "Unknown provider '{}' (expected 'openai' or 'stablelm')",
                other
            ))),
        }
    }
}

/// Optional model identifier overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

/// Endpoint, credentials and models for one provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider flavor
    #[serde(default)]
    pub kind: ProviderKind,
    /// API base URL, e.g. `https://api.openai.com/v1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Bearer token sent in the `Authorization` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier overrides
    #[serde(default)]
    pub models: ModelOverrides,
}

impl ProviderConfig {
    /// Create a config for the given provider with default endpoint and models
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Set API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the chat model
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.models.chat = Some(model.into());
        self
    }

    /// Effective base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
            .trim_end_matches('/')
    }

    /// Configured API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    pub fn chat_model(&self) -> &str {
        self.models
            .chat
            .as_deref()
            .unwrap_or_else(|| self.kind.default_chat_model())
    }

    /// Speech model sent upstream; StableLM requests carry none
    pub fn speech_model(&self) -> Option<&str> {
        let default = self.kind.default_speech_model()?;
        Some(self.models.speech.as_deref().unwrap_or(default))
    }

    /// Image model sent upstream; StableLM requests carry none
    pub fn image_model(&self) -> Option<&str> {
        let default = self.kind.default_image_model()?;
        Some(self.models.image.as_deref().unwrap_or(default))
    }

    /// Check that every model override is one this provider sends
    pub fn validate_models(&self) -> GatewayResult<()> {
        let unused = [
            ("speech", &self.models.speech, self.kind.default_speech_model()),
            ("image", &self.models.image, self.kind.default_image_model()),
        ];
        for (name, value, default) in unused {
            if value.is_some() && default.is_none() {
                return Err(GatewayError::config(format!(
                    "Provider '{}' does not take a {} model override",
                    self.kind, name
                )));
            }
        }
        Ok(())
    }

    pub fn voice(&self) -> &str {
        self.models
            .voice
            .as_deref()
            .unwrap_or_else(|| self.kind.default_voice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("StableLM".parse::<ProviderKind>().unwrap(), ProviderKind::StableLm);
        assert_eq!("stable_lm".parse::<ProviderKind>().unwrap(), ProviderKind::StableLm);
        assert!("anthropic".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_kind_serde() {
        let kind: ProviderKind = serde_json::from_str("\"stablelm\"").unwrap();
        assert_eq!(kind, ProviderKind::StableLm);
        assert_eq!(serde_json::to_string(&ProviderKind::OpenAi).unwrap(), "\"openai\"");
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = ProviderConfig::new(ProviderKind::OpenAi);
        assert_eq!(config.base_url(), "https://api.openai.com/v1");
        assert_eq!(config.chat_model(), "gpt-3.5-turbo");
        assert_eq!(config.voice(), "alloy");
        assert!(config.api_key().is_none());

        let config = ProviderConfig::new(ProviderKind::StableLm)
            .with_base_url("http://localhost:9000/v1/")
            .with_chat_model("zephyr-custom")
            .with_api_key("");
        assert_eq!(config.base_url(), "http://localhost:9000/v1");
        assert_eq!(config.chat_model(), "zephyr-custom");
        assert_eq!(config.voice(), "en-US-1");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_stablelm_sends_no_speech_or_image_model() {
        let config = ProviderConfig::new(ProviderKind::StableLm);
        assert_eq!(config.speech_model(), None);
        assert_eq!(config.image_model(), None);
        assert!(config.validate_models().is_ok());

        let openai = ProviderConfig::new(ProviderKind::OpenAi);
        assert_eq!(openai.speech_model(), Some("tts-1"));
        assert_eq!(openai.image_model(), Some("dall-e-3"));
    }

    #[test]
    fn test_unused_model_override_rejected() {
        let mut config = ProviderConfig::new(ProviderKind::StableLm);
        config.models.image = Some("sdxl".to_string());
        let err = config.validate_models().unwrap_err();
        assert!(err.message().contains("image model"));

        let mut openai = ProviderConfig::new(ProviderKind::OpenAi);
        openai.models.image = Some("dall-e-2".to_string());
        assert!(openai.validate_models().is_ok());
        assert_eq!(openai.image_model(), Some("dall-e-2"));
    }
}
