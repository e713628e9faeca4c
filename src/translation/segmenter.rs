/*!
 * Sentence segmentation and phrase extraction.
 *
 * With an NLP engine, phrases are the engine's noun chunks split into
 * leading stopwords, content span and trailing stopwords. A chunk whose
 * content is not a glossary key also yields its longest glossary sub-runs,
 * so "Drink water" still surfaces "water". Without an engine, every word
 * found in the glossary becomes a single-word phrase.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::nlp::{self, NlpEngine, Span, Token};
use super::stopwords::{self, strip_stopwords};
use crate::terminology::TerminologyStore;

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Invalid word regex"));

/// A candidate span of a sentence, offsets in bytes relative to the sentence
///
/// `chunk_start..chunk_end` covers the whole chunk including adjacent
/// stopwords; `content_start..content_end` covers only the content words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Content tokens joined by single spaces, original case
    pub content: String,
    /// Original chunk text including stopwords
    pub full_text: String,
    pub chunk_start: usize,
    pub chunk_end: usize,
    pub content_start: usize,
    pub content_end: usize,
    /// Text between chunk start and content start
    pub leading_stopwords: String,
    /// Text between content end and chunk end
    pub trailing_stopwords: String,
}

impl Phrase {
    /// Check `chunk_start <= content_start <= content_end <= chunk_end`
    pub fn is_well_formed(&self) -> bool {
        self.chunk_start <= self.content_start
            && self.content_start <= self.content_end
            && self.content_end <= self.chunk_end
    }

    fn single_word(word: &str, start: usize, end: usize) -> Self {
        Self {
            content: word.to_string(),
            full_text: word.to_string(),
            chunk_start: start,
            chunk_end: end,
            content_start: start,
            content_end: end,
            leading_stopwords: String::new(),
            trailing_stopwords: String::new(),
        }
    }
}

/// Splits text into sentences and sentences into phrases
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'a> {
    engine: Option<&'a dyn NlpEngine>,
}

impl<'a> Segmenter<'a> {
    pub fn new(engine: Option<&'a dyn NlpEngine>) -> Self {
        Self { engine }
    }

    /// Sentence spans in order, from the engine or the regex fallback
    pub fn sentences(&self, text: &str) -> Vec<Span> {
        let mut spans = match self.engine {
            Some(engine) => engine.segment_sentences(text),
            None => nlp::split_sentences(text),
        };
        spans.sort_by_key(|span| span.start);
        spans
    }

    /// Stopword classification, from the engine or the static list
    pub fn is_stopword(&self, word: &str) -> bool {
        match self.engine {
            Some(engine) => engine.is_stopword(word),
            None => stopwords::is_stopword(word),
        }
    }

    /// Candidate phrases of one sentence
    pub fn extract_phrases(&self, sentence: &str, store: &TerminologyStore) -> Vec<Phrase> {
        match self.engine {
            Some(engine) => Self::chunk_phrases(engine, sentence, store),
            None => Self::word_phrases(sentence, store),
        }
    }

    fn chunk_phrases(engine: &dyn NlpEngine, sentence: &str, store: &TerminologyStore) -> Vec<Phrase> {
        let tokens = engine.tokenize(sentence);
        let is_stop = |word: &str| engine.is_stopword(word);
        let mut phrases = Vec::new();

        for range in engine.extract_chunks(sentence, &tokens) {
            let Some(chunk) = tokens.get(range) else {
                continue;
            };
            let Some(phrase) = Self::phrase_from_chunk(sentence, chunk) else {
                debug!("Skipping chunk without content words");
                continue;
            };

            let resolves = in_glossary(store, &phrase.content, is_stop);
            phrases.push(phrase);
            if !resolves {
                phrases.extend(Self::glossary_runs(sentence, chunk, store, is_stop));
            }
        }

        phrases
    }

    /// Longest glossary runs inside a chunk, scanned left to right
    ///
    /// Runs start and end on content tokens. A run opening at the chunk's
    /// first content token keeps the chunk's leading stopwords.
    fn glossary_runs(
        sentence: &str,
        chunk: &[Token],
        store: &TerminologyStore,
        is_stop: impl Fn(&str) -> bool,
    ) -> Vec<Phrase> {
        let content: Vec<usize> = (0..chunk.len()).filter(|&i| chunk[i].is_content()).collect();
        let mut runs = Vec::new();
        let mut i = 0;

        while i < content.len() {
            let hit = (i..content.len()).rev().find_map(|j| {
                let first = if i == 0 { 0 } else { content[i] };
                let phrase = Self::phrase_from_chunk(sentence, &chunk[first..=content[j]])?;
                in_glossary(store, &phrase.content, &is_stop).then_some((j, phrase))
            });

            match hit {
                Some((j, phrase)) => {
                    debug!("Matched glossary run '{}' inside chunk", phrase.content);
                    runs.push(phrase);
                    i = j + 1;
                }
                None => i += 1,
            }
        }

        runs
    }

    /// Build a phrase from a chunk's tokens; `None` when every token is a
    /// stopword or the offsets do not fall on the sentence's char boundaries
    fn phrase_from_chunk(sentence: &str, chunk: &[Token]) -> Option<Phrase> {
        let first = chunk.iter().position(Token::is_content)?;
        let last = chunk.iter().rposition(Token::is_content)?;

        let chunk_start = chunk.first()?.start;
        let chunk_end = chunk.last()?.end;
        let content_start = chunk[first].start;
        let content_end = chunk[last].end;

        let content = chunk[first..=last]
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let phrase = Phrase {
            content,
            full_text: sentence.get(chunk_start..chunk_end)?.to_string(),
            chunk_start,
            chunk_end,
            content_start,
            content_end,
            leading_stopwords: sentence.get(chunk_start..content_start)?.to_string(),
            trailing_stopwords: sentence.get(content_end..chunk_end)?.to_string(),
        };

        phrase.is_well_formed().then_some(phrase)
    }

    /// Fallback: every glossary word becomes its own phrase
    fn word_phrases(sentence: &str, store: &TerminologyStore) -> Vec<Phrase> {
        WORD_REGEX
            .find_iter(sentence)
            .filter(|m| store.contains(&m.as_str().to_lowercase()))
            .map(|m| Phrase::single_word(m.as_str(), m.start(), m.end()))
            .collect()
    }
}

/// Whether a content string resolves to a glossary key, directly or with
/// stopwords removed
fn in_glossary(store: &TerminologyStore, content: &str, is_stop: impl Fn(&str) -> bool) -> bool {
    let key = content.to_lowercase();
    if store.contains(&key) {
        return true;
    }
    let cleaned = strip_stopwords(&key, is_stop);
    !cleaned.is_empty() && store.contains(&cleaned)
}
