/*!
 * Mock provider implementations for testing
 *
 * `yaltwai::providers::mock::MockProvider` covers dictionary and failure
 * behaviors. The scripted provider here replays a fixed sequence of replies,
 * for tests that need a specific request to go wrong.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use yaltwai::errors::ProviderError;
use yaltwai::providers::mock::MockProvider;
use yaltwai::providers::{Message, Provider};

/// English to French dictionary used across tests
pub fn french_mock() -> Arc<MockProvider> {
    Arc::new(MockProvider::with_mapping([
        ("Hello", "Bonjour"),
        ("Goodbye", "Au revoir"),
        ("Inbox", "Boîte de réception"),
        ("Screen title", "Titre de l'écran"),
        ("Hello {name}", "Bonjour {name}"),
        ("File", "Fichier"),
        ("Quit", "Quitter"),
        ("Cancel", "Annuler"),
        ("OK", "D'accord"),
    ]))
}

/// Replays queued replies in order; fails once the queue is empty
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    /// Provider answering with `replies`, one per request
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// User prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Number of requests received
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, messages: Vec<Message>) -> Result<String, ProviderError> {
        if let Some(last) = messages.last() {
            self.prompts.lock().push(last.content.clone());
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::ApiError("no scripted reply left".to_string())))
    }
}
