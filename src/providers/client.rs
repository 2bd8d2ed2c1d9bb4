use async_trait::async_trait;
use log::{debug, error};
use reqwest::{header, Client};
use std::time::Duration;

use crate::errors::ProviderError;
use super::{error_message, truncate_body, ChatApi, Message, Provider};

/// HTTP client for one chat-completion service
#[derive(Debug)]
pub struct ChatClient<A: ChatApi> {
    /// Request and response shape of the service
    api: A,
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
}

impl<A: ChatApi> ChatClient<A> {
    /// Create a client with a per-request timeout
    pub fn new(api: A, api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api,
            client,
            api_key: api_key.into(),
        })
    }

    /// Service description
    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: ChatApi> Provider for ChatClient<A> {
    fn name(&self) -> &str {
        self.api.name()
    }

    fn model(&self) -> &str {
        self.api.model()
    }

    async fn complete(&self, messages: Vec<Message>) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::InvalidConfiguration(format!(
                "No API key configured for {}",
                self.api.name()
            )));
        }

        let url = self.api.endpoint_url(&self.api_key)?;
        let body = serde_json::to_vec(&self.api.build_request_body(&messages)?)
            .map_err(|e| ProviderError::JsonError(e.to_string()))?;

        debug!("{} request to {} ({} bytes)", self.api.name(), self.api.base_url(), body.len());

        let request = self.client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.api
            .authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(format!("Failed to send request to {}: {}", self.api.name(), e)))?;

        let status = response.status();
        let text = response.text().await
            .map_err(|e| ProviderError::NetworkError(format!("Failed to read {} response: {}", self.api.name(), e)))?;

        if !status.is_success() {
            error!("{} API error ({}): {}", self.api.name(), status, truncate_body(&text, 500));
            return Err(match error_message(&text) {
                Some(message) => self.api.classify_error(&message),
                None => ProviderError::InvalidResponse(format!("HTTP {}: {}", status, truncate_body(&text, 200))),
            });
        }

        self.api.parse_response(&text)
    }
}
