//! Hosted provider client for OpenAI and Anthropic chat APIs

use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

use crate::error::{ApiFailure, GeneratorError, GeneratorResult};
use crate::traits::TextGenerator;
use crate::types::{GenerationRequest, GenerationResponse, GeneratorConfig, ProviderId};

/// Real text generator backed by one hosted provider
pub struct RealTextGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl RealTextGenerator {
    /// Create a generator with a single pooled HTTP client
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::ConfigError {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn failure(&self, reason: ApiFailure) -> GeneratorError {
        GeneratorError::UpstreamGenerationFailure {
            provider: self.config.provider,
            reason,
        }
    }

    async fn post_json(&self, builder: reqwest::RequestBuilder) -> GeneratorResult<serde_json::Value> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.failure(ApiFailure::from_reqwest(&e)))?;

        if !response.status().is_success() {
            return Err(self.failure(ApiFailure::from_status(response.status())));
        }

        response
            .json()
            .await
            .map_err(|e| self.failure(ApiFailure::InvalidRequest(format!("Failed to parse response: {e}"))))
    }

    /// OpenAI chat completions request (private helper)
    async fn make_openai_request(&self, request: &GenerationRequest) -> GeneratorResult<(String, u32)> {
        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": request.instructions },
                { "role": "user", "content": request.user_message() }
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature
        });

        let builder = self
            .client
            .post(self.config.endpoint()?)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body);
        let response_json = self.post_json(builder).await?;

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| self.failure(ApiFailure::InvalidRequest("No content in response".to_string())))?;

        let total_tokens = response_json
            .get("usage")
            .and_then(|u| u.get("total_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as u32;

        Ok((content.to_string(), total_tokens))
    }

    /// Anthropic messages request (private helper)
    async fn make_anthropic_request(&self, request: &GenerationRequest) -> GeneratorResult<(String, u32)> {
        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "system": request.instructions,
            "messages": [
                { "role": "user", "content": request.user_message() }
            ]
        });

        let builder = self
            .client
            .post(self.config.endpoint()?)
            .header("x-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .header("anthropic-version", "2023-06-01")
            .json(&request_body);
        let response_json = self.post_json(builder).await?;

        let content = response_json
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|item| item.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| self.failure(ApiFailure::InvalidRequest("No content in response".to_string())))?;

        let usage = response_json.get("usage");
        let input_tokens = usage
            .and_then(|u| u.get("input_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as u32;
        let output_tokens = usage
            .and_then(|u| u.get("output_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as u32;

        Ok((content.to_string(), input_tokens + output_tokens))
    }
}

#[async_trait]
impl TextGenerator for RealTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GeneratorResult<GenerationResponse> {
        let request_start = Instant::now();

        let (content, tokens_used) = match self.config.provider {
            ProviderId::OpenAI => self.make_openai_request(request).await?,
            ProviderId::Anthropic => self.make_anthropic_request(request).await?,
        };

        let response_time = request_start.elapsed();
        debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            tokens = tokens_used,
            elapsed_ms = response_time.as_millis() as u64,
            "Generation completed"
        );

        Ok(GenerationResponse {
            content,
            provider: self.config.provider,
            model: self.config.model.clone(),
            tokens_used,
            response_time,
        })
    }

    fn is_live(&self) -> bool {
        true
    }
}
