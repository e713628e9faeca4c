/*!
 * Terminology-controlled translation pipeline.
 *
 * Text flows strictly forward through these submodules:
 *
 * - `segmenter` / `nlp` / `stopwords`: sentences and candidate phrases
 * - `matcher`: filtering of phrases against the glossary
 * - `placeholder`: substitution of matched phrases by `<N>` markers
 * - `restorer`: restoration with case transfer and sentence capitalization
 * - `core`: a full preprocess, translate, postprocess call
 * - `batch`: concurrent processing of many texts
 */

// Re-export main types for easier usage
pub use self::batch::{BatchRecord, BatchTranslator};
pub use self::core::{TerminologyTranslator, TranslationOutput, TranslationResult};
pub use self::nlp::{NlpEngine, RuleBasedEngine};
pub use self::placeholder::{CaseInfo, Placeholder, Preprocessed};
pub use self::restorer::CasePolicy;

// Submodules
pub mod batch;
pub mod core;
pub mod matcher;
pub mod nlp;
pub mod placeholder;
pub mod restorer;
pub mod segmenter;
pub mod stopwords;
