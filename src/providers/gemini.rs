use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::ProviderError;
use super::{error_message, truncate_body, ChatApi, Message, Role};

/// Google Gemini (`POST /v1beta/models/{model}:generateContent?key=...`)
///
/// Gemini takes a single prompt here, so system instructions are folded
/// into the text in front of the last message.
#[derive(Debug, Clone)]
pub struct GeminiApi {
    /// Model name (e.g., "gemini-1.5-flash")
    model: String,
    /// Scheme and host, without trailing slash
    endpoint: String,
    /// Temperature for generation
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiApi {
    /// Create a Gemini description
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            temperature,
        }
    }

    fn prompt_text(messages: &[Message]) -> String {
        let instructions: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();
        let last = messages
            .iter()
            .rev()
            .find(|m| m.role != Role::System)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        if instructions.is_empty() {
            last.to_string()
        } else if last.is_empty() {
            instructions.join("\n\n")
        } else {
            format!("{}\n\n{}", instructions.join("\n\n"), last)
        }
    }
}

impl ChatApi for GeminiApi {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> &str {
        &self.endpoint
    }

    fn endpoint_url(&self, api_key: &str) -> Result<Url, ProviderError> {
        let raw = format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model);
        let mut url = Url::parse(&raw).map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", raw, e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    fn build_request_body(&self, messages: &[Message]) -> Result<Value, ProviderError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: Self::prompt_text(messages) }],
            }],
            generation_config: GenerationConfig { temperature: self.temperature },
        };
        serde_json::to_value(request).map_err(|e| ProviderError::JsonError(e.to_string()))
    }

    fn parse_response(&self, body: &str) -> Result<String, ProviderError> {
        if let Ok(response) = serde_json::from_str::<GenerateResponse>(body) {
            if let Some(text) = response
                .candidates
                .into_iter()
                .next()
                .and_then(|candidate| candidate.content.parts.into_iter().next())
                .map(|part| part.text)
            {
                return Ok(text);
            }
        }

        match error_message(body) {
            Some(message) => Err(self.classify_error(&message)),
            None => Err(ProviderError::InvalidResponse(format!(
                "Unexpected Gemini response: {}",
                truncate_body(body, 200)
            ))),
        }
    }

    fn classify_error(&self, message: &str) -> ProviderError {
        let lower = message.to_lowercase();
        if lower.contains("quota") {
            ProviderError::RateLimitExceeded
        } else if lower.contains("api key") {
            ProviderError::Unauthorized
        } else {
            ProviderError::ApiError(message.to_string())
        }
    }
}
