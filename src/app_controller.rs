use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, SegmentationMode, TranslationProvider};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Translator;
use crate::providers::google::GoogleTranslate;
use crate::providers::mock::MockProvider;
use crate::terminology::{ExportFormat, TermListing, TerminologyStore, export_terminology};
use crate::translation::{BatchRecord, BatchTranslator, NlpEngine, RuleBasedEngine, TerminologyTranslator, TranslationResult};

// @module: Application controller for terminology-controlled translation

/// Per-item details printed in debug mode
#[derive(Debug, Serialize)]
pub struct DebugReport<'a> {
    pub original: &'a str,
    pub translation: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
    pub preprocessed_text: &'a str,
    pub raw_translation: &'a str,
    pub terms_replaced: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: External translation service
    translator: Arc<dyn Translator>,
}

impl Controller {
    /// Create a new controller for test purposes, backed by the echo mock
    pub fn new_for_test() -> Result<Self> {
        let mut config = Config::default();
        config.provider.provider_type = TranslationProvider::Mock;
        Self::with_config(config)
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let translator = Self::build_provider(&config);
        Ok(Self { config, translator })
    }

    /// Create a controller with an explicit translation service
    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config, translator })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn build_provider(config: &Config) -> Arc<dyn Translator> {
        let provider = &config.provider;
        match provider.provider_type {
            TranslationProvider::Google => Arc::new(GoogleTranslate::new_with_config(
                provider.endpoint.clone(),
                provider.timeout_secs,
                provider.retry_count,
                provider.retry_backoff_ms,
                provider.rate_limit,
            )),
            TranslationProvider::Mock => Arc::new(MockProvider::echo()),
        }
    }

    /// Load the glossary configured for this controller
    pub fn load_store(&self) -> TerminologyStore {
        TerminologyStore::load_or_empty(self.config.terminology_path.as_deref().map(Path::new))
    }

    /// Assemble the terminology translator from the configuration
    pub fn build_translator(&self) -> Result<TerminologyTranslator> {
        let store = Arc::new(self.load_store());
        let source = language_utils::to_provider_code(&self.config.source_language)?;
        let target = language_utils::to_provider_code(&self.config.target_language)?;
        debug!("Provider language codes: {} -> {}", source, target);

        let engine: Option<Arc<dyn NlpEngine>> = match self.config.segmentation {
            SegmentationMode::Chunked => Some(Arc::new(RuleBasedEngine::new())),
            SegmentationMode::Words => None,
        };

        let mut translator = TerminologyTranslator::new(store, Arc::clone(&self.translator), source, target)
            .with_engine(engine);
        if self.config.provider.timeout_secs > 0 {
            translator = translator.with_timeout(Duration::from_secs(self.config.provider.timeout_secs));
        }

        Ok(translator)
    }

    /// Verify the configured translation service is reachable
    pub async fn check_connection(&self) -> Result<()> {
        let start = Instant::now();
        self.translator
            .check_connection()
            .await
            .context("Translation service is not reachable")?;
        info!("Translation service reachable ({})", Self::format_duration(start.elapsed()));
        Ok(())
    }

    /// Translate a single text
    pub async fn translate_text(&self, text: &str) -> Result<TranslationResult> {
        let translator = self.build_translator()?;
        let result = translator.translate(text).await?;
        info!("Replaced {} glossary term(s)", result.replacements_count);
        Ok(result)
    }

    /// Translate every line independently, in order
    pub async fn translate_lines(&self, lines: &[String], show_progress: bool) -> Result<Vec<BatchRecord>> {
        let start_time = Instant::now();
        let translator = self.build_translator()?;
        let batch = BatchTranslator::new(&translator, self.config.provider.concurrent_requests);

        let progress_bar = if show_progress {
            let progress_bar = ProgressBar::new(lines.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) {msg} {eta}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            progress_bar.set_style(style.progress_chars("█▓▒░"));
            progress_bar
        } else {
            ProgressBar::hidden()
        };

        let records = batch
            .translate_all(lines, |done, _total| progress_bar.set_position(done as u64))
            .await;
        progress_bar.finish_and_clear();

        let failed = records.iter().filter(|r| r.is_failed()).count();
        if failed > 0 {
            warn!("{} of {} lines failed to translate", failed, records.len());
        }
        info!(
            "Translated {} lines in {}",
            records.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(records)
    }

    /// Translate a file of one text per non-empty line
    pub async fn translate_file(&self, path: &Path, show_progress: bool) -> Result<Vec<BatchRecord>> {
        let lines = FileManager::read_lines(path)?;
        if lines.is_empty() {
            warn!("No text found in {:?}", path);
        }
        self.translate_lines(&lines, show_progress).await
    }

    /// Render a single result as plain text or as a JSON debug report
    pub fn render_result(&self, result: &TranslationResult, debug_output: bool) -> Result<String> {
        if !debug_output {
            return Ok(result.final_text.clone());
        }

        let report = DebugReport {
            original: &result.original,
            translation: &result.final_text,
            source_language: &self.config.source_language,
            target_language: &self.config.target_language,
            preprocessed_text: &result.preprocessed,
            raw_translation: &result.translated_raw,
            terms_replaced: result.replacements_count,
        };
        serde_json::to_string_pretty(&report).context("Failed to serialize debug report")
    }

    /// Render batch records, one line per input or a JSON array in debug mode
    pub fn render_batch(records: &[BatchRecord], debug_output: bool) -> Result<String> {
        if debug_output {
            return serde_json::to_string_pretty(records).context("Failed to serialize batch results");
        }

        Ok(records
            .iter()
            .map(|record| match record {
                BatchRecord::Translated(output) => output.text.clone(),
                BatchRecord::Failed { error, .. } => format!("[ERROR] {}", error),
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Write output to a file, or to stdout when no path is given
    pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
        match path {
            Some(path) => {
                FileManager::write_to_file(path, content)?;
                info!("Translation saved to {}", path.display());
            }
            None => println!("{}", content),
        }
        Ok(())
    }

    /// Glossary keys and their count
    pub fn list_terms(&self) -> TermListing {
        TermListing::from_store(&self.load_store())
    }

    /// Export the configured glossary
    pub fn export_terms(&self, format: ExportFormat) -> Result<String> {
        export_terminology(&self.load_store(), format)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
