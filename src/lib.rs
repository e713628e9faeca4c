/*!
 * # Termlock - terminology-controlled machine translation
 *
 * A Rust library that keeps domain glossary terms intact through a
 * general-purpose machine translation service.
 *
 * ## Features
 *
 * - Glossary loading from comma, semicolon or tab separated files
 * - Noun-chunk aware phrase matching with stopword handling
 * - Opaque `<N>` markers substituted before translation and restored after
 * - Case transfer from the source phrase and sentence capitalization
 * - Batch translation with bounded concurrency and per-item error records
 * - ISO 639-1/639-3 language code handling
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `terminology`: glossary store, export and sample glossary
 * - `translation`: the substitution pipeline:
 *   - `translation::segmenter`: sentences and candidate phrases
 *   - `translation::matcher`: glossary matching
 *   - `translation::placeholder`: marker substitution
 *   - `translation::restorer`: restoration and case transfer
 *   - `translation::core`: single translation call
 *   - `translation::batch`: batch processing
 * - `providers`: external translation services:
 *   - `providers::google`: Google Translate web endpoint
 *   - `providers::mock`: deterministic mock
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod terminology;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TerminologyError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, to_provider_code};
pub use providers::Translator;
pub use terminology::TerminologyStore;
pub use translation::{TerminologyTranslator, TranslationOutput, TranslationResult};
