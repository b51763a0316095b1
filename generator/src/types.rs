//! Generator-specific data types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::{GeneratorError, GeneratorResult};

/// Hosted LLM providers the generator can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    OpenAI,
    Anthropic,
}

impl ProviderId {
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "gpt-4o-mini",
            ProviderId::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "https://api.openai.com",
            ProviderId::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Environment variable holding the provider's API key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "OPENAI_API_KEY",
            ProviderId::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::OpenAI => write!(f, "openai"),
            ProviderId::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAI),
            "anthropic" | "claude" => Ok(ProviderId::Anthropic),
            _ => Err(format!("Unknown provider: {s}")),
        }
    }
}

/// A structured prompt: role instructions plus a task payload
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub instructions: String,
    pub payload: serde_json::Value,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(instructions: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            instructions: instructions.into(),
            payload,
            max_tokens: 2000,
            temperature: 0.4,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Render the payload as the user message body
    pub fn user_message(&self) -> String {
        match &self.payload {
            serde_json::Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

/// Provider response data
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub content: String,
    pub provider: ProviderId,
    pub model: String,
    pub tokens_used: u32,
    pub response_time: Duration,
}

/// Connection settings for a hosted provider
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub provider: ProviderId,
    pub model: String,
    pub api_key: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl GeneratorConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(provider: ProviderId, api_key: impl Into<String>) -> GeneratorResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeneratorError::ConfigError {
                message: format!("{} is empty", provider.api_key_var()),
            });
        }
        Ok(Self {
            provider,
            model: provider.default_model().to_string(),
            api_key,
            base_url: Self::parse_base_url(provider.default_base_url())?,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> GeneratorResult<Self> {
        self.base_url = Self::parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full endpoint URL for the provider's chat API
    pub fn endpoint(&self) -> GeneratorResult<Url> {
        let path = match self.provider {
            ProviderId::OpenAI => "v1/chat/completions",
            ProviderId::Anthropic => "v1/messages",
        };
        self.base_url.join(path).map_err(|e| GeneratorError::ConfigError {
            message: format!("Invalid endpoint for {}: {e}", self.base_url),
        })
    }

    fn parse_base_url(raw: &str) -> GeneratorResult<Url> {
        // A trailing slash keeps Url::join from replacing the last path segment
        let normalized = if raw.ends_with('/') { raw.to_string() } else { format!("{raw}/") };
        Url::parse(&normalized).map_err(|e| GeneratorError::ConfigError {
            message: format!("Invalid base URL '{raw}': {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("OpenAI".parse::<ProviderId>().unwrap(), ProviderId::OpenAI);
        assert_eq!("claude".parse::<ProviderId>().unwrap(), ProviderId::Anthropic);
        assert!("gemini".parse::<ProviderId>().is_err());
    }

    #[test]
    fn test_config_rejects_empty_key() {
        assert!(GeneratorConfig::new(ProviderId::OpenAI, "  ").is_err());
    }

    #[test]
    fn test_endpoint_respects_base_url_path() {
        let config = GeneratorConfig::new(ProviderId::OpenAI, "sk-test")
            .unwrap()
            .with_base_url("http://127.0.0.1:9999/proxy")
            .unwrap();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://127.0.0.1:9999/proxy/v1/chat/completions"
        );

        let anthropic = GeneratorConfig::new(ProviderId::Anthropic, "key").unwrap();
        assert_eq!(anthropic.endpoint().unwrap().as_str(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_user_message_passes_plain_text_through() {
        let request = GenerationRequest::new("be brief", serde_json::Value::String("hello".into()));
        assert_eq!(request.user_message(), "hello");
    }
}
