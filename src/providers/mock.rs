/*!
 * Mock provider for tests and dry runs.
 *
 * The mock answers in-process, without network access:
 * - `MockProvider::identity()` - echoes every segment back
 * - `MockProvider::with_mapping()` - replaces known segments, echoes the rest
 * - `MockProvider::fixed()` - always answers with the same text
 * - `MockProvider::failing()` - always fails with the given error
 *
 * Batched prompts are understood in both packings: `|||`-joined text and
 * JSON arrays of strings. Every call is recorded for later inspection.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::ProviderError;
use crate::providers::{Message, Provider, Role};
use crate::translation::batch::SEGMENT_DELIMITER;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns every segment unchanged
    Identity,
    /// Replaces segments found in the map
    Mapping(HashMap<String, String>),
    /// Returns the same text for every request
    Fixed(String),
    /// Always fails with an error
    Failing(ProviderError),
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Fail with the error when the system prompt contains the marker
    fail_when: Vec<(String, ProviderError)>,
    /// Answer with one extra segment when the system prompt contains the marker
    malformed_when: Vec<String>,
    /// Conversations received so far
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            fail_when: Vec::new(),
            malformed_when: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Echo every segment
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Translate with a fixed dictionary
    pub fn with_mapping<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::new(MockBehavior::Mapping(map))
    }

    /// Always answer `response`
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(response.into()))
    }

    /// Always fail with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self::new(MockBehavior::Failing(error))
    }

    /// Fail whenever the system prompt mentions `marker` (e.g. a language name)
    pub fn fail_for(mut self, marker: impl Into<String>, error: ProviderError) -> Self {
        self.fail_when.push((marker.into(), error));
        self
    }

    /// Return a wrong segment count whenever the system prompt mentions `marker`
    pub fn malformed_for(mut self, marker: impl Into<String>) -> Self {
        self.malformed_when.push(marker.into());
        self
    }

    /// Number of requests received
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Copy of every conversation received
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().clone()
    }

    /// Last user message of every request
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|messages| last_user_content(messages).map(str::to_string))
            .collect()
    }

    fn translate_segment(&self, segment: &str) -> String {
        match &self.behavior {
            MockBehavior::Mapping(map) => map
                .get(segment.trim())
                .cloned()
                .unwrap_or_else(|| segment.to_string()),
            _ => segment.to_string(),
        }
    }

    fn answer(&self, prompt: &str, malformed: bool) -> String {
        if let Ok(segments) = serde_json::from_str::<Vec<String>>(prompt) {
            let mut translated: Vec<String> = segments.iter().map(|s| self.translate_segment(s)).collect();
            if malformed {
                translated.push("extra".to_string());
            }
            return serde_json::to_string(&translated).unwrap_or_default();
        }

        let mut translated: Vec<String> = prompt
            .split(SEGMENT_DELIMITER)
            .map(|s| self.translate_segment(s.trim()))
            .collect();
        if malformed {
            translated.push("extra".to_string());
        }
        translated.join(&format!(" {} ", SEGMENT_DELIMITER))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::identity()
    }
}

fn system_content(messages: &[Message]) -> String {
    messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn last_user_content(messages: &[Message]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, messages: Vec<Message>) -> Result<String, ProviderError> {
        self.calls.lock().push(messages.clone());

        let system = system_content(&messages);
        if let Some((_, error)) = self.fail_when.iter().find(|(marker, _)| system.contains(marker.as_str())) {
            return Err(error.clone());
        }

        let prompt = last_user_content(&messages).unwrap_or_default();
        match &self.behavior {
            MockBehavior::Failing(error) => Err(error.clone()),
            MockBehavior::Fixed(response) => Ok(response.clone()),
            MockBehavior::Identity | MockBehavior::Mapping(_) => {
                let malformed = self.malformed_when.iter().any(|marker| system.contains(marker.as_str()));
                Ok(self.answer(prompt, malformed))
            }
        }
    }
}
