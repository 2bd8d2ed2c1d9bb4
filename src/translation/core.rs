/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService, which turns "translate these
 * strings into that language" into provider requests and validates the
 * replies. Chunking and pacing live in `batch`.
 */

use log::{debug, info};
use std::sync::Arc;

use crate::app_config::{SegmentProtocol, TranslationConfig};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{self, Message, Provider};
use super::batch::{join_segments, split_segments};

/// Translation options for customizing the translation process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationOptions {
    /// Number of strings per request
    pub batch_size: usize,

    /// Pause between consecutive requests, in milliseconds
    pub batch_delay_ms: u64,

    /// How strings are packed into one request
    pub segment_protocol: SegmentProtocol,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay_ms: 1000,
            segment_protocol: SegmentProtocol::Delimiter,
        }
    }
}

impl From<&TranslationConfig> for TranslationOptions {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            batch_size: config.common.batch_size.max(1),
            batch_delay_ms: config.common.batch_delay_ms,
            segment_protocol: config.common.segment_protocol,
        }
    }
}

/// Main translation service
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Back-end answering the requests
    provider: Arc<dyn Provider>,

    /// Translation options
    pub options: TranslationOptions,
}

impl TranslationService {
    /// Create a service for the provider selected by the configuration
    pub fn new(config: &TranslationConfig) -> Result<Self, ProviderError> {
        let provider = providers::create_provider(config)?;
        info!("Using {} with model {}", provider.name(), provider.model());
        Ok(Self::with_provider(provider, TranslationOptions::from(config)))
    }

    /// Create a service over an existing provider
    pub fn with_provider(provider: Arc<dyn Provider>, options: TranslationOptions) -> Self {
        Self { provider, options }
    }

    /// Provider in use
    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Translate one text
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let messages = vec![
            Message::system(single_prompt(target_language)),
            Message::user(text),
        ];
        let reply = self.provider.complete(messages).await?;
        Ok(reply.trim().to_string())
    }

    /// Translate one chunk of texts in a single request
    ///
    /// The reply must hold exactly one segment per input text, in order.
    pub async fn batch_translate(&self, texts: &[String], target_language: &str) -> Result<Vec<String>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let translations = match self.options.segment_protocol {
            SegmentProtocol::Delimiter => {
                let messages = vec![
                    Message::system(delimiter_prompt(target_language)),
                    Message::user(join_segments(texts)),
                ];
                let reply = self.provider.complete(messages).await?;
                split_segments(&reply)
            }
            SegmentProtocol::JsonArray => {
                let payload = serde_json::to_string(texts)
                    .map_err(|e| ProviderError::JsonError(e.to_string()))?;
                let messages = vec![
                    Message::system(json_array_prompt(target_language)),
                    Message::user(payload),
                ];
                let reply = self.provider.complete(messages).await?;
                parse_json_array(&reply)?
            }
        };

        if translations.len() != texts.len() {
            return Err(ProviderError::InvalidResponse(format!(
                "Expected {} translated segments, got {}",
                texts.len(),
                translations.len()
            )));
        }

        debug!("Translated {} segments into {}", translations.len(), target_language);
        Ok(translations)
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        info!("Testing connection to {} with model {}", self.provider.name(), self.provider.model());
        self.provider.test_connection().await
    }
}

fn single_prompt(target_language: &str) -> String {
    format!(
        "You are a professional software localizer. Translate the following text into {}. \
         Return only the translation, without any explanation.",
        language_utils::prompt_language_name(target_language)
    )
}

fn delimiter_prompt(target_language: &str) -> String {
    format!(
        "You are a professional software localizer. Translate each segment of the following text into {}. \
         Segments are separated by |||. Keep the separators, keep the order, keep placeholders such as \
         %@, %d, {{name}} unchanged and return only the translated segments.",
        language_utils::prompt_language_name(target_language)
    )
}

fn json_array_prompt(target_language: &str) -> String {
    format!(
        "You are a professional software localizer. The user message is a JSON array of strings. \
         Translate every string into {}, keep placeholders such as %@, %d, {{name}} unchanged and reply \
         with a JSON array of the same length and order, nothing else.",
        language_utils::prompt_language_name(target_language)
    )
}

// Models sometimes wrap the array in a code fence or a sentence
fn parse_json_array(reply: &str) -> Result<Vec<String>, ProviderError> {
    let start = reply.find('[');
    let end = reply.rfind(']');
    let slice = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => {
            return Err(ProviderError::InvalidResponse(
                "Reply does not contain a JSON array".to_string(),
            ))
        }
    };

    serde_json::from_str::<Vec<String>>(slice)
        .map(|items| items.into_iter().map(|item| item.trim().to_string()).collect())
        .map_err(|e| ProviderError::InvalidResponse(format!("Reply is not a JSON array of strings: {}", e)))
}
