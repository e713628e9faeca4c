/*!
 * Glossary export and sample generation.
 */

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::path::Path;

use super::store::{Term, TerminologyStore};
use crate::file_utils::FileManager;

/// Output format for glossary export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(anyhow!("Invalid export format: {}", s)),
        }
    }
}

/// Summary of a loaded glossary
#[derive(Debug, Clone, Serialize)]
pub struct TermListing {
    pub term_count: usize,
    pub terms: Vec<String>,
}

impl TermListing {
    pub fn from_store(store: &TerminologyStore) -> Self {
        let terms: Vec<String> = store.terms().into_iter().map(|t| t.term).collect();
        Self {
            term_count: terms.len(),
            terms,
        }
    }
}

/// Render the glossary as a list of `{term, translation}` records
pub fn export_terminology(store: &TerminologyStore, format: ExportFormat) -> Result<String> {
    let terms = store.terms();
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&terms).context("Failed to serialize terminology to JSON")
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for term in &terms {
                writer
                    .serialize(term)
                    .context("Failed to serialize terminology row")?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e))?;
            String::from_utf8(bytes).context("CSV output is not valid UTF-8")
        }
    }
}

/// A small Akan (Twi) glossary useful for trying the tool out
pub fn sample_terms() -> Vec<Term> {
    [
        ("house", "efie"),
        ("car", "kaa"),
        ("school", "sukuu"),
        ("water", "nsu"),
        ("market", "dwabea"),
    ]
    .iter()
    .map(|(term, translation)| Term {
        term: term.to_string(),
        translation: translation.to_string(),
    })
    .collect()
}

/// Write the sample glossary as CSV
pub fn save_sample_terminology<P: AsRef<Path>>(path: P) -> Result<()> {
    let store = TerminologyStore::from_pairs(
        sample_terms()
            .into_iter()
            .map(|t| (t.term, t.translation)),
    );
    let content = export_terminology(&store, ExportFormat::Csv)?;
    FileManager::write_to_file(path, &content)
}
