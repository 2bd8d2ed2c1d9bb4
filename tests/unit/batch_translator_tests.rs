/*!
 * Tests for the translation service and the batch translator
 */

use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

use yaltwai::app_config::SegmentProtocol;
use yaltwai::errors::ProviderError;
use yaltwai::providers::mock::MockProvider;
use yaltwai::translation::batch::{join_segments, split_segments, ProgressFn};
use yaltwai::translation::{BatchTranslator, TranslationOptions, TranslationService, SEGMENT_DELIMITER};

use crate::common::mock_providers::{french_mock, ScriptedProvider};
use crate::common::test_translator;

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_batchTranslate_withEmptyInput_shouldNotCallProvider() {
    let mock = Arc::new(MockProvider::identity());
    let service = TranslationService::with_provider(mock.clone(), TranslationOptions::default());

    let result = service.batch_translate(&[], "fr").await.unwrap();

    assert!(result.is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_batchTranslate_shouldJoinWithDelimiterAndNameLanguage() {
    let mock = french_mock();
    let service = TranslationService::with_provider(mock.clone(), TranslationOptions::default());

    let result = service.batch_translate(&texts(&["Hello", "Goodbye"]), "fr").await.unwrap();

    assert_eq!(result, texts(&["Bonjour", "Au revoir"]));
    assert_eq!(mock.prompts(), vec![format!("Hello {} Goodbye", SEGMENT_DELIMITER)]);
    let system = &mock.calls()[0][0].content;
    assert!(system.contains("French"), "{}", system);
    assert!(system.contains(SEGMENT_DELIMITER), "{}", system);
}

#[tokio::test]
async fn test_batchTranslate_withExtraSegment_shouldRejectReply() {
    let mock = Arc::new(MockProvider::identity().malformed_for("French"));
    let service = TranslationService::with_provider(mock, TranslationOptions::default());

    let error = service.batch_translate(&texts(&["a", "b"]), "fr").await.unwrap_err();

    assert!(matches!(error, ProviderError::InvalidResponse(ref m) if m.contains("Expected 2")), "{:?}", error);
}

#[tokio::test]
async fn test_batchTranslate_withMissingSegment_shouldRejectReply() {
    let mock = Arc::new(MockProvider::fixed("Bonjour |||   "));
    let service = TranslationService::with_provider(mock, TranslationOptions::default());

    let error = service.batch_translate(&texts(&["Hello", "Goodbye"]), "fr").await.unwrap_err();

    assert!(matches!(error, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_batchTranslate_withJsonArrayProtocol_shouldAcceptFencedReply() {
    let mock = Arc::new(MockProvider::fixed("```json\n[\"Bonjour\", \"Au revoir\"]\n```"));
    let options = TranslationOptions { segment_protocol: SegmentProtocol::JsonArray, ..TranslationOptions::default() };
    let service = TranslationService::with_provider(mock.clone(), options);

    let result = service.batch_translate(&texts(&["Hello", "Goodbye"]), "fr").await.unwrap();

    assert_eq!(result, texts(&["Bonjour", "Au revoir"]));
    assert_eq!(mock.prompts(), vec![r#"["Hello","Goodbye"]"#.to_string()]);
}

#[tokio::test]
async fn test_batchTranslate_withJsonArrayProtocolAndProse_shouldFail() {
    let mock = Arc::new(MockProvider::fixed("Sorry, I cannot help with that."));
    let options = TranslationOptions { segment_protocol: SegmentProtocol::JsonArray, ..TranslationOptions::default() };
    let service = TranslationService::with_provider(mock, options);

    assert!(matches!(
        service.batch_translate(&texts(&["Hello"]), "fr").await,
        Err(ProviderError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_translateAll_shouldChunkAndKeepOrder() {
    let mock = Arc::new(MockProvider::identity());
    let translator = test_translator(mock.clone(), 2);
    let input = texts(&["one", "two", "three", "four", "five"]);

    let result = translator.translate_all(&input, "de", None).await.unwrap();

    assert_eq!(result, input);
    assert_eq!(
        mock.prompts(),
        vec!["one ||| two".to_string(), "three ||| four".to_string(), "five".to_string()]
    );
}

#[tokio::test]
async fn test_translateAll_shouldReportMonotonicProgress() {
    let mock = Arc::new(MockProvider::identity());
    let translator = test_translator(mock, 2);
    let input = texts(&["a", "b", "c", "d", "e"]);
    let seen = Mutex::new(Vec::new());
    let record = |fraction: f64| seen.lock().push(fraction);
    let callback: ProgressFn<'_> = &record;

    translator.translate_all(&input, "de", Some(callback)).await.unwrap();

    assert_eq!(*seen.lock(), vec![0.4, 0.8, 1.0]);
}

#[tokio::test]
async fn test_translateAll_withEmptyInput_shouldReportDoneWithoutCalls() {
    let mock = Arc::new(MockProvider::identity());
    let translator = test_translator(mock.clone(), 3);
    let seen = Mutex::new(Vec::new());
    let record = |fraction: f64| seen.lock().push(fraction);
    let callback: ProgressFn<'_> = &record;

    let result = translator.translate_all(&[], "de", Some(callback)).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(mock.call_count(), 0);
    assert_eq!(*seen.lock(), vec![1.0]);
}

#[tokio::test]
async fn test_translateAll_withFailingSecondChunk_shouldDropEverything() {
    let scripted = Arc::new(ScriptedProvider::new(vec![
        Ok("A ||| B".to_string()),
        Err(ProviderError::RateLimitExceeded),
        Ok("E".to_string()),
    ]));
    let translator = test_translator(scripted.clone(), 2);

    let result = translator.translate_all(&texts(&["a", "b", "c", "d", "e"]), "fr", None).await;

    assert_eq!(result, Err(ProviderError::RateLimitExceeded));
    // The third chunk is never sent
    assert_eq!(scripted.call_count(), 2);
}

#[tokio::test]
async fn test_translateAll_withDelay_shouldPauseBetweenChunksOnly() {
    let mock = Arc::new(MockProvider::identity());
    let service = TranslationService::with_provider(mock.clone(), TranslationOptions::default());
    let translator = BatchTranslator::new(service)
        .with_batch_size(1)
        .with_delay(Duration::from_millis(30));

    let start = Instant::now();
    translator.translate_all(&texts(&["a", "b", "c"]), "fr", None).await.unwrap();

    // Two pauses for three chunks
    assert!(start.elapsed() >= Duration::from_millis(60));
    assert_eq!(mock.call_count(), 3);
}

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.!?%@{}]{0,20}[A-Za-z0-9.!?]"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_translateAll_shouldPreserveLengthAndPosition(
        input in prop::collection::vec(segment(), 0..40),
        batch_size in 1usize..12,
    ) {
        let mock = Arc::new(MockProvider::identity());
        let translator = test_translator(mock.clone(), batch_size);

        let result = tokio_test::block_on(translator.translate_all(&input, "fr", None)).unwrap();

        let normalized: Vec<String> = input.iter().map(|s| split_segments(s).join(" ")).collect();
        prop_assert_eq!(result, normalized);
        prop_assert_eq!(mock.call_count(), input.len().div_ceil(batch_size));

        let prompts = mock.prompts();
        for (index, prompt) in prompts.iter().enumerate() {
            let remaining = input.len() - index * batch_size;
            prop_assert_eq!(split_segments(prompt).len(), batch_size.min(remaining));
        }
    }

    #[test]
    fn prop_splitSegments_shouldInvertJoin(input in prop::collection::vec(segment(), 1..20)) {
        let normalized: Vec<String> = input.iter().map(|s| split_segments(s).join(" ")).collect();
        prop_assert_eq!(split_segments(&join_segments(&input)), normalized);
    }
}
