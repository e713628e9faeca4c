/*!
 * Filtering of candidate phrases against the glossary.
 */

use log::debug;

use super::segmenter::Phrase;
use super::stopwords::strip_stopwords;
use crate::terminology::TerminologyStore;

/// A phrase whose content resolved to a glossary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPhrase {
    pub phrase: Phrase,
    /// Glossary key the phrase resolved to
    pub key: String,
    pub translation: String,
}

/// Case-insensitive glossary matcher
pub struct Matcher<'a> {
    store: &'a TerminologyStore,
}

impl<'a> Matcher<'a> {
    pub fn new(store: &'a TerminologyStore) -> Self {
        Self { store }
    }

    /// Keep only the phrases found in the glossary
    pub fn match_phrases(
        &self,
        phrases: Vec<Phrase>,
        is_stopword: impl Fn(&str) -> bool,
    ) -> Vec<MatchedPhrase> {
        phrases
            .into_iter()
            .filter_map(|phrase| self.match_phrase(phrase, &is_stopword))
            .collect()
    }

    /// Look up the lower-cased content, retrying once with stopwords removed
    pub fn match_phrase(
        &self,
        phrase: Phrase,
        is_stopword: impl Fn(&str) -> bool,
    ) -> Option<MatchedPhrase> {
        let key = phrase.content.to_lowercase();
        if let Some(translation) = self.store.lookup(&key) {
            return Some(MatchedPhrase {
                translation: translation.to_string(),
                key,
                phrase,
            });
        }

        let cleaned = strip_stopwords(&key, is_stopword);
        if cleaned.is_empty() || cleaned == key {
            return None;
        }

        let translation = self.store.lookup(&cleaned)?.to_string();
        debug!("Matched '{}' after stopword removal as '{}'", phrase.content, cleaned);
        Some(MatchedPhrase {
            phrase,
            key: cleaned,
            translation,
        })
    }
}
