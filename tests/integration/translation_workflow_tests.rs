/*!
 * End-to-end translation tests against mock translation services
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;

use termlock::errors::TranslationError;
use termlock::providers::mock::MockProvider;
use termlock::translation::{BatchRecord, BatchTranslator};

use crate::common;
use crate::common::mock_translators::{ScriptedTranslator, SelectiveFailureTranslator};

#[tokio::test]
async fn test_translate_withEchoProvider_shouldSubstituteGlossaryTerms() {
    let provider = MockProvider::echo();
    let translator = common::sample_translator(Arc::new(provider.clone()));

    let result = translator.translate("The car is at the market").await.unwrap();

    assert_eq!(result.preprocessed, "The <1> is at the <0>");
    assert_eq!(result.final_text, "The Kaa is at the dwabea");
    assert_eq!(result.replacements_count, 2);
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translate_shouldSendOnlyMarkersForGlossaryTerms() {
    let scripted = ScriptedTranslator::akan();
    let translator = common::sample_translator(Arc::new(scripted.clone()));

    translator.translate("I want to buy a big house").await.unwrap();

    let requests = scripted.requests();
    assert_eq!(requests, vec!["I want to buy a <0>".to_string()]);
    assert!(!requests[0].contains("house"));
}

#[tokio::test]
async fn test_translate_withUppercasingProvider_shouldRestoreOriginalCase() {
    let translator = common::sample_translator(Arc::new(MockProvider::uppercase()));

    let result = translator.translate("I want to buy a house").await.unwrap();

    assert_eq!(result.translated_raw, "I WANT TO BUY A <0>");
    assert_eq!(result.final_text, "I WANT TO BUY A efie");
}

#[tokio::test]
async fn test_translate_whenProviderDropsMarkers_shouldReturnTextWithoutTerms() {
    let translator = common::sample_translator(Arc::new(MockProvider::drop_markers()));

    let result = translator.translate("Bring the water").await.unwrap();

    assert_eq!(result.preprocessed, "Bring the <0>");
    assert_eq!(result.replacements_count, 0);
    assert!(!result.final_text.contains("nsu"));
    assert!(!result.final_text.contains('<'));
}

#[tokio::test]
async fn test_translate_withoutGlossaryMatches_shouldPassTextThrough() {
    let provider = MockProvider::echo();
    let translator = common::sample_translator(Arc::new(provider.clone()));

    let result = translator.translate("hello there").await.unwrap();

    assert_eq!(result.preprocessed, "hello there");
    assert_eq!(result.final_text, "Hello there");
    assert_eq!(result.replacements_count, 0);
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translate_withBlankInput_shouldSkipProvider() {
    let provider = MockProvider::echo();
    let translator = common::sample_translator(Arc::new(provider.clone()));

    let result = translator.translate("   ").await.unwrap();

    assert_eq!(result.final_text, "   ");
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_withFailingProvider_shouldReturnProviderError() {
    let translator = common::sample_translator(Arc::new(MockProvider::failing()));

    let error = translator.translate("a house").await.unwrap_err();

    assert!(matches!(error, TranslationError::Provider(_)));
}

#[tokio::test]
async fn test_translate_withSlowProvider_shouldTimeOut() {
    let translator =
        common::sample_translator(Arc::new(MockProvider::slow(2_000))).with_timeout(Duration::from_millis(50));

    let error = translator.translate("a house").await.unwrap_err();

    assert!(matches!(error, TranslationError::Timeout(_)));
}

#[tokio::test]
async fn test_batch_shouldKeepInputOrderWithConcurrency() {
    let translator = common::sample_translator(Arc::new(MockProvider::echo()));
    let batch = BatchTranslator::new(&translator, 4);
    let texts = vec!["a house", "a car", "the market", "water", "nothing here"];

    let records = batch.translate_all(&texts, |_, _| {}).await;

    let finals: Vec<String> = records
        .iter()
        .map(|record| match record {
            BatchRecord::Translated(output) => output.text.clone(),
            BatchRecord::Failed { error, .. } => panic!("unexpected failure: {}", error),
        })
        .collect();
    assert_eq!(finals, vec!["A efie", "A kaa", "The dwabea", "Nsu", "Nothing here"]);
}

#[tokio::test]
async fn test_batch_withSelectiveFailure_shouldIsolateFailedItem() {
    let failing = SelectiveFailureTranslator { trigger: "poison" };
    let translator = common::sample_translator(Arc::new(failing));
    let batch = BatchTranslator::new(&translator, 2);
    let texts = vec!["a house".to_string(), "poison pill".to_string(), "a car".to_string()];

    let records = batch.translate_all(&texts, |_, _| {}).await;

    assert_eq!(records.len(), 3);
    assert!(!records[0].is_failed());
    assert!(records[1].is_failed());
    assert!(!records[2].is_failed());
    assert_eq!(records[1].original(), "poison pill");
    match &records[1] {
        BatchRecord::Failed { error, .. } => assert!(error.contains("Simulated failure")),
        BatchRecord::Translated(_) => panic!("expected a failed record"),
    }
}

#[tokio::test]
async fn test_batch_shouldReportProgressForEveryItem() {
    let translator = common::sample_translator(Arc::new(MockProvider::failing()));
    let batch = BatchTranslator::new(&translator, 3);
    let progress = Mutex::new(Vec::new());

    let records = batch
        .translate_all(&["one", "two"], |done, total| {
            if let Ok(mut seen) = progress.lock() {
                seen.push((done, total));
            }
        })
        .await;

    assert!(records.iter().all(BatchRecord::is_failed));
    assert_eq!(progress.into_inner().unwrap(), vec![(1, 2), (2, 2)]);
}

#[tokio::test]
async fn test_batchRecord_serialization_shouldBeTaggedByStatus() {
    let translator = common::sample_translator(Arc::new(MockProvider::intermittent(2)));
    let batch = BatchTranslator::new(&translator, 1);

    let records = batch.translate_all(&["a car", "a house"], |_, _| {}).await;
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["status"], "translated");
    assert_eq!(json[0]["text"], "A kaa");
    assert_eq!(json[0]["replacements_count"], 1);
    assert_eq!(json[1]["status"], "failed");
    assert_eq!(json[1]["original"], "a house");
}
