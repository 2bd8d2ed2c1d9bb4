/*!
 * Provider implementations for the chat-completion services used for translation.
 *
 * Each service is described by a `ChatApi` (where to send a request, how to
 * shape its body, how to read its reply); `ChatClient` drives any `ChatApi`
 * over HTTP. Supported services:
 * - DeepSeek: OpenAI-style chat completions with a bearer token
 * - Gemini: Google `generateContent` with the key in the query string
 *
 * `mock` holds an in-process provider for tests and dry runs.
 */

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

pub mod client;
pub mod deepseek;
pub mod gemini;
pub mod mock;

pub use self::client::ChatClient;
pub use self::deepseek::DeepSeekApi;
pub use self::gemini::GeminiApi;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// System instruction
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// User turn
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Request and response shape of one chat-completion service
pub trait ChatApi: Send + Sync + Debug {
    /// Short service name used in logs
    fn name(&self) -> &'static str;

    /// Model requested from the service
    fn model(&self) -> &str;

    /// Scheme and host the requests go to
    fn base_url(&self) -> &str;

    /// Full request URL
    fn endpoint_url(&self, api_key: &str) -> Result<Url, ProviderError>;

    /// Attach credentials to a request; the default sends none
    fn authorize(&self, request: RequestBuilder, _api_key: &str) -> RequestBuilder {
        request
    }

    /// JSON body for a conversation
    fn build_request_body(&self, messages: &[Message]) -> Result<Value, ProviderError>;

    /// Text of a successful reply
    fn parse_response(&self, body: &str) -> Result<String, ProviderError>;

    /// Map a provider-reported error message to an error kind
    fn classify_error(&self, message: &str) -> ProviderError;
}

/// Common trait for all translation back-ends
///
/// Implemented by `ChatClient` for real services and by `mock::MockProvider`.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Service name used in logs
    fn name(&self) -> &str;

    /// Model in use
    fn model(&self) -> &str;

    /// Send a conversation and return the reply text
    async fn complete(&self, messages: Vec<Message>) -> Result<String, ProviderError>;

    /// Send a minimal request to check credentials and connectivity
    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(vec![Message::user("Hello")]).await.map(|_| ())
    }
}

/// Error envelope shared by both services: `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Message of a provider error payload, if `body` is one
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

/// Shorten a response body for error messages
pub(crate) fn truncate_body(body: &str, max_chars: usize) -> String {
    let mut shortened: String = body.chars().take(max_chars).collect();
    if body.chars().count() > max_chars {
        shortened.push_str("...");
    }
    shortened
}

/// Build the provider selected by the configuration
pub fn create_provider(config: &TranslationConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let model = config.get_model();
    let endpoint = config.get_endpoint();
    let api_key = config.get_api_key();
    let timeout = Duration::from_secs(config.get_timeout_secs());
    let temperature = config.common.temperature;

    let provider: Arc<dyn Provider> = match config.provider {
        TranslationProvider::DeepSeek => Arc::new(ChatClient::new(
            DeepSeekApi::new(model, endpoint, temperature),
            api_key,
            timeout,
        )?),
        TranslationProvider::Gemini => Arc::new(ChatClient::new(
            GeminiApi::new(model, endpoint, temperature),
            api_key,
            timeout,
        )?),
    };

    Ok(provider)
}
