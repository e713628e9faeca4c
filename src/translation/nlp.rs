/*!
 * NLP capability used by the segmenter.
 *
 * The pipeline only needs sentence boundaries, tokens flagged as
 * content/stopword with byte offsets, and noun-chunk boundaries. Any engine
 * able to provide those can be plugged in through [`NlpEngine`];
 * [`RuleBasedEngine`] is the built-in implementation based on regular
 * expressions and a static stopword list.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Debug;
use std::ops::Range;

use super::stopwords;

/// Break after sentence-final punctuation followed by whitespace
static SENTENCE_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("Invalid sentence break regex"));

/// Words (with inner apostrophes) or single punctuation characters
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:['’]\w+)*|[^\w\s]").expect("Invalid token regex")
});

/// Possessive clitics split off the word they attach to
const POSSESSIVE_SUFFIXES: &[&str] = &["'s", "'S", "\u{2019}s", "\u{2019}S"];

/// Title abbreviations whose period does not end a sentence
const TITLE_ABBREVIATIONS: &[&str] = &["Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr.", "St."];

/// Byte range of a sentence within the full text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A token of a sentence with its byte offsets relative to that sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl Token {
    /// Whether the token carries lexical content
    pub fn is_content(&self) -> bool {
        !self.is_stop && !self.is_punct
    }
}

/// Sentence, token and chunk analysis consumed by the segmenter
pub trait NlpEngine: Send + Sync + Debug {
    /// Split text into sentence spans, in order and non-overlapping
    fn segment_sentences(&self, text: &str) -> Vec<Span>;

    /// Tokenize one sentence
    fn tokenize(&self, sentence: &str) -> Vec<Token>;

    /// Noun-phrase-like chunks as token index ranges into `tokens`
    fn extract_chunks(&self, sentence: &str, tokens: &[Token]) -> Vec<Range<usize>>;

    /// Stopword classification for a single word
    fn is_stopword(&self, word: &str) -> bool;
}

/// Split after `.`, `!` or `?` followed by whitespace
///
/// The whitespace between sentences is not part of either span.
pub fn split_sentences(text: &str) -> Vec<Span> {
    split_sentences_with(text, |_| false)
}

fn split_sentences_with(text: &str, keep_together: impl Fn(&str) -> bool) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK_REGEX.find_iter(text) {
        // Punctuation is a single ASCII byte
        let end = m.start() + 1;
        if keep_together(&text[start..end]) {
            continue;
        }
        if end > start {
            spans.push(Span::new(start, end));
        }
        start = m.end();
    }

    if start < text.len() {
        spans.push(Span::new(start, text.len()));
    }

    spans
}

/// Regex and stopword-list based engine
#[derive(Debug, Clone, Default)]
pub struct RuleBasedEngine;

impl RuleBasedEngine {
    pub fn new() -> Self {
        Self
    }

    fn ends_with_title_abbreviation(text: &str) -> bool {
        text.split_whitespace()
            .last()
            .map(|word| word.trim_start_matches(['"', '\'', '(', '\u{201C}', '\u{2018}']))
            .is_some_and(|word| TITLE_ABBREVIATIONS.contains(&word))
    }
}

/// Byte length of the word before a possessive `'s`, if there is one
///
/// Contractions listed as stopwords (`it's`, `that's`) stay whole.
fn possessive_stem_len(word: &str) -> Option<usize> {
    if stopwords::is_stopword(word) {
        return None;
    }
    POSSESSIVE_SUFFIXES
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .map(str::len)
}

fn make_token(text: &str, start: usize) -> Token {
    let is_punct = !text.chars().any(|c| c.is_alphanumeric() || c == '_');
    Token {
        text: text.to_string(),
        start,
        end: start + text.len(),
        is_stop: !is_punct && stopwords::is_stopword(text),
        is_punct,
    }
}

/// Accumulates token ranges while scanning a sentence
#[derive(Default)]
struct ChunkBuilder {
    chunks: Vec<Range<usize>>,
    start: Option<usize>,
    has_content: bool,
}

impl ChunkBuilder {
    fn open(&mut self, index: usize) {
        if self.start.is_none() {
            self.start = Some(index);
        }
    }

    fn close(&mut self, end: usize) {
        if let Some(start) = self.start.take() {
            if end > start {
                self.chunks.push(start..end);
            }
        }
        self.has_content = false;
    }
}

impl NlpEngine for RuleBasedEngine {
    fn segment_sentences(&self, text: &str) -> Vec<Span> {
        split_sentences_with(text, Self::ends_with_title_abbreviation)
    }

    fn tokenize(&self, sentence: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for m in TOKEN_REGEX.find_iter(sentence) {
            let text = m.as_str();
            match possessive_stem_len(text) {
                Some(stem) => {
                    tokens.push(make_token(&text[..stem], m.start()));
                    tokens.push(make_token(&text[stem..], m.start() + stem));
                }
                None => tokens.push(make_token(text, m.start())),
            }
        }

        tokens
    }

    /// Determiners open a chunk, content words extend it, pronouns are
    /// chunks of their own, anything else closes it.
    fn extract_chunks(&self, _sentence: &str, tokens: &[Token]) -> Vec<Range<usize>> {
        let mut builder = ChunkBuilder::default();

        for (index, token) in tokens.iter().enumerate() {
            if token.is_punct {
                builder.close(index);
            } else if token.is_content() {
                builder.open(index);
                builder.has_content = true;
            } else if stopwords::is_pronoun(&token.text) {
                builder.close(index);
                builder.chunks.push(index..index + 1);
            } else if stopwords::is_determiner(&token.text) {
                if builder.has_content {
                    builder.close(index);
                }
                builder.open(index);
            } else {
                builder.close(index);
            }
        }
        builder.close(tokens.len());

        builder.chunks
    }

    fn is_stopword(&self, word: &str) -> bool {
        stopwords::is_stopword(word)
    }
}
