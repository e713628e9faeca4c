/*!
 * Core terminology-controlled translation.
 *
 * This module contains the `TerminologyTranslator`, which runs one text
 * through preprocess (marker substitution), the external translator and
 * postprocess (restoration).
 */

use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::TranslationError;
use crate::providers::Translator;
use crate::terminology::TerminologyStore;

use super::nlp::{NlpEngine, RuleBasedEngine};
use super::placeholder::{self, Preprocessed};
use super::restorer::{self, Restored};
use super::segmenter::Segmenter;

/// Every intermediate stage of one translation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    /// Source text as given
    pub original: String,
    /// Text sent to the translator, markers included
    pub preprocessed: String,
    /// Translator output before restoration
    pub translated_raw: String,
    /// Final text with glossary translations restored
    pub final_text: String,
    /// Number of markers restored
    pub replacements_count: usize,
}

impl TranslationResult {
    fn unchanged(text: &str) -> Self {
        Self {
            original: text.to_string(),
            preprocessed: text.to_string(),
            translated_raw: text.to_string(),
            final_text: text.to_string(),
            replacements_count: 0,
        }
    }
}

/// Public output record of a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationOutput {
    pub text: String,
    pub original: String,
    pub replacements_count: usize,
}

impl From<&TranslationResult> for TranslationOutput {
    fn from(result: &TranslationResult) -> Self {
        Self {
            text: result.final_text.clone(),
            original: result.original.clone(),
            replacements_count: result.replacements_count,
        }
    }
}

impl From<TranslationResult> for TranslationOutput {
    fn from(result: TranslationResult) -> Self {
        Self {
            text: result.final_text,
            original: result.original,
            replacements_count: result.replacements_count,
        }
    }
}

/// Terminology-aware translator
///
/// Cheap to clone; the store, engine and external translator are shared.
#[derive(Debug, Clone)]
pub struct TerminologyTranslator {
    store: Arc<TerminologyStore>,
    engine: Option<Arc<dyn NlpEngine>>,
    translator: Arc<dyn Translator>,
    source_language: String,
    target_language: String,
    timeout: Option<Duration>,
}

impl TerminologyTranslator {
    /// Create a translator using the rule-based NLP engine
    pub fn new(
        store: Arc<TerminologyStore>,
        translator: Arc<dyn Translator>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            store,
            engine: Some(Arc::new(RuleBasedEngine::new())),
            translator,
            source_language: source_language.into(),
            target_language: target_language.into(),
            timeout: None,
        }
    }

    /// Replace the NLP engine; `None` selects the word-scan fallback
    pub fn with_engine(mut self, engine: Option<Arc<dyn NlpEngine>>) -> Self {
        self.engine = engine;
        self
    }

    /// Bound the external translation call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &TerminologyStore {
        &self.store
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Replace glossary phrases in `text` by markers
    pub fn preprocess(&self, text: &str) -> Preprocessed {
        let segmenter = Segmenter::new(self.engine.as_deref());
        placeholder::preprocess(text, &self.store, &segmenter)
    }

    /// Restore glossary translations into translator output
    pub fn postprocess(&self, translated: &str, preprocessed: &Preprocessed) -> Restored {
        restorer::restore(translated, &preprocessed.substitutions)
    }

    /// Translate one text
    ///
    /// Whitespace-only input is returned unchanged without calling the
    /// external translator. A failed or timed-out call is returned as an
    /// error without any restoration.
    pub async fn translate(&self, text: &str) -> Result<TranslationResult, TranslationError> {
        if text.trim().is_empty() {
            return Ok(TranslationResult::unchanged(text));
        }

        let preprocessed = self.preprocess(text);
        debug!("Preprocessed: {}", preprocessed.text);

        let translated_raw = self.call_translator(&preprocessed.text).await?;
        debug!("Raw translation: {}", translated_raw);

        let restored = self.postprocess(&translated_raw, &preprocessed);
        if !restored.missing.is_empty() {
            info!(
                "{} of {} glossary terms were lost by the translator",
                restored.missing.len(),
                preprocessed.len()
            );
        }

        Ok(TranslationResult {
            original: text.to_string(),
            preprocessed: preprocessed.text,
            translated_raw,
            final_text: restored.text,
            replacements_count: restored.restored,
        })
    }

    async fn call_translator(&self, text: &str) -> Result<String, TranslationError> {
        let call = self
            .translator
            .translate(text, &self.source_language, &self.target_language);

        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => Ok(result?),
                Err(_) => Err(TranslationError::Timeout(limit.as_secs())),
            },
            None => Ok(call.await?),
        }
    }
}
