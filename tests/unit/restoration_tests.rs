/*!
 * Tests for restoration and case transfer through a full translation call
 */

use std::sync::Arc;

use termlock::providers::mock::MockProvider;
use termlock::translation::CaseInfo;
use termlock::translation::placeholder::Substitution;
use termlock::translation::restorer::{CasePolicy, ensure_sentence_capitalization, restore};
use termlock::translation::Placeholder;

use crate::common;
use crate::common::mock_translators::ScriptedTranslator;

fn substitution(n: usize, translation: &str, content: &str, full: &str, leading: &str) -> Substitution {
    Substitution {
        placeholder: Placeholder(n),
        translation: translation.to_string(),
        case_info: CaseInfo {
            content: content.to_string(),
            full: full.to_string(),
            leading_stopword: leading.to_string(),
        },
    }
}

#[tokio::test]
async fn test_translate_withAllCapsChunk_shouldUpperCaseTranslation() {
    let translator = common::sample_translator(Arc::new(MockProvider::echo()));

    let result = translator.translate("THE HOUSE is big").await.unwrap();

    assert_eq!(result.final_text, "THE EFIE is big");
    assert_eq!(result.replacements_count, 1);
}

#[tokio::test]
async fn test_translate_withTitleCaseTerm_shouldTitleCaseTranslation() {
    let translator = common::sample_translator(Arc::new(MockProvider::echo()));

    let result = translator.translate("I like the Big House").await.unwrap();

    assert_eq!(result.preprocessed, "I like the <0>");
    assert_eq!(result.final_text, "I like the Efie Kɛse");
}

#[tokio::test]
async fn test_translate_withMarkerMovedToSentenceStart_shouldCapitalize() {
    let translator = common::sample_translator(Arc::new(ScriptedTranslator::akan()));

    let result = translator.translate("The house is new").await.unwrap();

    assert_eq!(result.translated_raw, "<0> yɛ foforɔ");
    assert_eq!(result.final_text, "Efie yɛ foforɔ");
}

#[tokio::test]
async fn test_translate_withLowerCaseMidSentenceTerm_shouldStayLowerCase() {
    let translator = common::sample_translator(Arc::new(ScriptedTranslator::akan()));

    let result = translator.translate("I want to buy a house").await.unwrap();

    assert_eq!(result.translated_raw, "Me pɛ sɛ metɔ <0>");
    assert_eq!(result.final_text, "Me pɛ sɛ metɔ efie");
}

#[tokio::test]
async fn test_translate_withMarkerAfterSentencePunctuation_shouldCapitalize() {
    let translator = common::sample_translator(Arc::new(ScriptedTranslator::akan()));

    let result = translator.translate("I want a car. The house is new.").await.unwrap();

    assert_eq!(result.preprocessed, "I want a <0>. The <1> is new.");
    assert_eq!(result.final_text, "Me pɛ kaa. Efie yɛ foforɔ.");
    assert_eq!(result.replacements_count, 2);
}

#[tokio::test]
async fn test_translate_withLowercasingTranslator_shouldRecapitalizeSentences() {
    let scripted = ScriptedTranslator::lowercasing();
    let translator = common::sample_translator(Arc::new(scripted.clone()));

    let result = translator.translate("The car is red. The house is old.").await.unwrap();

    assert_eq!(scripted.requests(), vec!["The <0> is red. The <1> is old.".to_string()]);
    assert_eq!(result.final_text, "The Kaa is red. The Efie is old.");
}

#[tokio::test]
async fn test_translate_withTermsOutsideDeterminerChunks_shouldRestoreWithCase() {
    let translator = common::sample_translator(Arc::new(MockProvider::echo()));

    let result = translator.translate("He saw Big House").await.unwrap();
    assert_eq!(result.final_text, "He saw Efie Kɛse");

    let result = translator.translate("Big house stands").await.unwrap();
    assert_eq!(result.final_text, "Efie kɛse stands");

    let result = translator.translate("The house's roof leaks").await.unwrap();
    assert_eq!(result.final_text, "The Efie's roof leaks");
}

#[test]
fn test_restore_shouldNotDependOnMarkerOrder() {
    let substitutions = vec![
        substitution(0, "efie", "house", "the house", "the "),
        substitution(1, "kaa", "car", "The car", "The "),
    ];

    let restored = restore("<0> ne <1>", &substitutions);

    assert_eq!(restored.text, "Efie ne Kaa");
    assert_eq!(restored.restored, 2);
    assert!(restored.missing.is_empty());
}

#[test]
fn test_restore_withAlteredMarker_shouldReportMissing() {
    let substitutions = vec![
        substitution(0, "efie", "house", "a house", "a "),
        substitution(1, "kaa", "car", "a car", "a "),
    ];

    let restored = restore("me wɔ < 0 > ne <1>", &substitutions);

    assert_eq!(restored.text, "Me wɔ < 0 > ne kaa");
    assert_eq!(restored.missing, vec![Placeholder(0)]);
    assert_eq!(restored.restored, 1);
}

#[test]
fn test_casePolicy_withCapitalizedLeadingStopwordOnly_shouldCapitalize() {
    let info = CaseInfo {
        content: "house".to_string(),
        full: "The house".to_string(),
        leading_stopword: "The ".to_string(),
    };
    assert_eq!(CasePolicy::from_case_info(&info), CasePolicy::Capitalized);
}

#[test]
fn test_casePolicy_withSingleCapitalizedWord_shouldBeTitle() {
    let info = CaseInfo {
        content: "House".to_string(),
        full: "House".to_string(),
        leading_stopword: String::new(),
    };
    assert_eq!(CasePolicy::from_case_info(&info), CasePolicy::Title);
    assert_eq!(CasePolicy::Title.apply("efie kɛse"), "Efie Kɛse");
}

#[test]
fn test_ensureSentenceCapitalization_shouldHandleQuestionsAndExclamations() {
    assert_eq!(
        ensure_sentence_capitalization("ɛyɛ! wo ho te sɛn? me ho yɛ"),
        "Ɛyɛ! Wo ho te sɛn? Me ho yɛ"
    );
}
