use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::ProviderError;
use super::{error_message, truncate_body, ChatApi, Message};

/// DeepSeek chat completions (`POST /v1/chat/completions`, bearer auth)
#[derive(Debug, Clone)]
pub struct DeepSeekApi {
    /// Model name (e.g., "deepseek-chat")
    model: String,
    /// Scheme and host, without trailing slash
    endpoint: String,
    /// Temperature for generation
    temperature: f32,
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    stream: bool,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl DeepSeekApi {
    /// Create a DeepSeek description
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            temperature,
        }
    }
}

impl ChatApi for DeepSeekApi {
    fn name(&self) -> &'static str {
        "DeepSeek"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> &str {
        &self.endpoint
    }

    fn endpoint_url(&self, _api_key: &str) -> Result<Url, ProviderError> {
        let raw = format!("{}/v1/chat/completions", self.endpoint);
        Url::parse(&raw).map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    fn authorize(&self, request: RequestBuilder, api_key: &str) -> RequestBuilder {
        request.bearer_auth(api_key)
    }

    fn build_request_body(&self, messages: &[Message]) -> Result<Value, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };
        serde_json::to_value(request).map_err(|e| ProviderError::JsonError(e.to_string()))
    }

    fn parse_response(&self, body: &str) -> Result<String, ProviderError> {
        if let Ok(response) = serde_json::from_str::<ChatResponse>(body) {
            return response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| ProviderError::InvalidResponse("Response has no choices".to_string()));
        }

        match error_message(body) {
            Some(message) => Err(self.classify_error(&message)),
            None => Err(ProviderError::InvalidResponse(format!(
                "Unexpected DeepSeek response: {}",
                truncate_body(body, 200)
            ))),
        }
    }

    fn classify_error(&self, message: &str) -> ProviderError {
        let lower = message.to_lowercase();
        if lower.contains("rate limit") {
            ProviderError::RateLimitExceeded
        } else if lower.contains("invalid api key") || lower.contains("authentication fails") {
            ProviderError::Unauthorized
        } else {
            ProviderError::ApiError(message.to_string())
        }
    }
}
