/*!
 * Batch translation processing.
 *
 * A language's strings are cut into fixed-size chunks; each chunk is sent
 * as one request and chunks run strictly one after another with a fixed
 * pause in between, the only protection against provider rate limits.
 */

use log::{debug, error};
use std::time::Duration;

use crate::errors::ProviderError;
use super::core::TranslationService;

/// Separator between segments of a batched request and its reply
pub const SEGMENT_DELIMITER: &str = "|||";

/// Progress sink receiving the processed fraction, from 0.0 to 1.0
pub type ProgressFn<'a> = &'a (dyn Fn(f64) + Send + Sync);

/// Join texts into one delimited prompt
pub fn join_segments(texts: &[String]) -> String {
    texts.join(&format!(" {} ", SEGMENT_DELIMITER))
}

/// Split a delimited reply into trimmed, non-empty segments
///
/// Line breaks and runs of spaces are collapsed to single spaces first.
pub fn split_segments(reply: &str) -> Vec<String> {
    let mut normalized = reply.replace(['\r', '\n'], " ");
    while normalized.contains("  ") {
        normalized = normalized.replace("  ", " ");
    }

    normalized
        .split(SEGMENT_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Batch translator for processing strings in sequential chunks
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Strings per request
    batch_size: usize,

    /// Pause between two requests
    delay: Duration,
}

impl BatchTranslator {
    /// Create a new batch translator using the service options
    pub fn new(service: TranslationService) -> Self {
        Self {
            batch_size: service.options.batch_size.max(1),
            delay: Duration::from_millis(service.options.batch_delay_ms),
            service,
        }
    }

    /// Override the pause between requests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Override the chunk size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Underlying service
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Translate every text into `target_language`, preserving order
    ///
    /// Any failing chunk fails the whole call and chunks already translated
    /// are dropped.
    pub async fn translate_all(
        &self,
        texts: &[String],
        target_language: &str,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<String>, ProviderError> {
        let report = |fraction: f64| {
            if let Some(callback) = progress {
                callback(fraction);
            }
        };

        if texts.is_empty() {
            report(1.0);
            return Ok(Vec::new());
        }

        let total = texts.len();
        let chunk_count = total.div_ceil(self.batch_size);
        let mut results = Vec::with_capacity(total);

        for (index, chunk) in texts.chunks(self.batch_size).enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            debug!(
                "Translating chunk {}/{} ({} strings) into {}",
                index + 1,
                chunk_count,
                chunk.len(),
                target_language
            );

            let translated = self
                .service
                .batch_translate(chunk, target_language)
                .await
                .map_err(|e| {
                    error!("Chunk {}/{} for {} failed: {}", index + 1, chunk_count, target_language, e);
                    e
                })?;

            results.extend(translated);
            report(results.len() as f64 / total as f64);
        }

        Ok(results)
    }
}
