/*!
 * Read-only glossary of source terms and their mandated translations.
 *
 * Glossaries are loaded from delimited text (comma, semicolon or tab) with a
 * header row. Keys are stored lower-cased so lookups are case-insensitive;
 * translations are kept verbatim.
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::errors::TerminologyError;

/// Header names recognized for the source-term column, in priority order
const SOURCE_COLUMNS: &[&str] = &["text", "english", "source", "term", "word"];

/// Header names recognized for the translation column, in priority order
const TRANSLATION_COLUMNS: &[&str] = &["text_translated", "translation", "target", "translated"];

/// Delimiters that can be auto-detected, in priority order
const DELIMITERS: &[u8] = b",;\t";

/// A single glossary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Lower-cased source term
    pub term: String,
    /// Target-language translation
    pub translation: String,
}

/// Mapping from lower-cased source terms to translations
#[derive(Debug, Clone, Default)]
pub struct TerminologyStore {
    terms: HashMap<String, String>,
}

impl TerminologyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from in-memory pairs, applying the same key
    /// normalization as file loading
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut store = Self::new();
        for (source, translation) in pairs {
            store.insert(source.as_ref(), translation.as_ref());
        }
        store
    }

    /// Load a glossary file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TerminologyError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_delimited(&content)
    }

    /// Load a glossary from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TerminologyError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_delimited(&content)
    }

    /// Load a glossary, degrading to an empty store when the source is
    /// missing or unreadable
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("No terminology source provided, translating without term substitution");
            return Self::new();
        };

        match Self::load(path) {
            Ok(store) => {
                info!("Loaded {} terms from {}", store.len(), path.display());
                store
            }
            Err(e) => {
                warn!(
                    "Could not load terminology from {}: {}. Continuing without term substitution",
                    path.display(),
                    e
                );
                Self::new()
            }
        }
    }

    /// Parse delimited glossary content with a header row
    pub fn from_delimited(content: &str) -> Result<Self, TerminologyError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let header_line = content.lines().next().unwrap_or("");
        let delimiter = Self::detect_delimiter(header_line);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let (source_idx, translation_idx) = resolve_columns(&headers)?;
        debug!(
            "Terminology columns: source='{}', translation='{}', delimiter={:?}",
            headers[source_idx], headers[translation_idx], delimiter as char
        );

        let mut store = Self::new();
        let mut dropped = 0usize;

        for (index, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    // Header is line 1
                    debug!("Skipping malformed terminology row {}: {}", index + 2, e);
                    dropped += 1;
                    continue;
                }
            };

            let source = record.get(source_idx).unwrap_or("");
            let translation = record.get(translation_idx).unwrap_or("");
            if !store.insert(source, translation) {
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!("Dropped {} incomplete terminology rows", dropped);
        }

        Ok(store)
    }

    /// Pick the field delimiter by inspecting a header line
    ///
    /// Comma wins over semicolon, which wins over tab. Comma is the default
    /// when none of them appear.
    pub fn detect_delimiter(sample: &str) -> u8 {
        DELIMITERS
            .iter()
            .copied()
            .find(|d| sample.as_bytes().contains(d))
            .unwrap_or(b',')
    }

    /// Insert a pair; returns false when the row is dropped for an empty
    /// key or value
    fn insert(&mut self, source: &str, translation: &str) -> bool {
        let key = source.trim().to_lowercase();
        let value = translation.trim();
        if key.is_empty() || value.is_empty() {
            return false;
        }

        if let Some(previous) = self.terms.insert(key.clone(), value.to_string()) {
            debug!("Duplicate term '{}': '{}' replaced by '{}'", key, previous, value);
        }
        true
    }

    /// Look up a translation by (already lower-cased) key
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.terms.get(key).map(String::as_str)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.terms.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All entries sorted by source term
    pub fn terms(&self) -> Vec<Term> {
        let mut terms: Vec<Term> = self
            .terms
            .iter()
            .map(|(term, translation)| Term {
                term: term.clone(),
                translation: translation.clone(),
            })
            .collect();
        terms.sort_by(|a, b| a.term.cmp(&b.term));
        terms
    }
}

/// Locate the source and translation columns by header name, falling back to
/// the first two columns
fn resolve_columns(headers: &[String]) -> Result<(usize, usize), TerminologyError> {
    let find = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| headers.iter().position(|h| h == name))
    };

    match (find(SOURCE_COLUMNS), find(TRANSLATION_COLUMNS)) {
        (Some(source), Some(translation)) => Ok((source, translation)),
        _ if headers.len() >= 2 => Ok((0, 1)),
        _ => Err(TerminologyError::MissingColumns(headers.len())),
    }
}
