/*!
 * Placeholder substitution.
 *
 * Matched phrases are replaced by `<N>` markers before the text goes to the
 * external translator. Numbering is shared across the whole call and every
 * marker records its translation together with the original surface form
 * used later for case transfer.
 */

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::matcher::{MatchedPhrase, Matcher};
use super::segmenter::Segmenter;
use crate::terminology::TerminologyStore;

/// Opaque `<N>` marker standing in for a glossary phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Placeholder(pub usize);

impl Placeholder {
    pub fn marker(&self) -> String {
        format!("<{}>", self.0)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Hands out monotonically increasing placeholders for a single call,
/// skipping any number whose marker already occurs in the source text
#[derive(Debug)]
pub struct PlaceholderAllocator<'a> {
    next: usize,
    source: &'a str,
}

impl<'a> PlaceholderAllocator<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { next: 0, source }
    }

    pub fn next_placeholder(&mut self) -> Placeholder {
        loop {
            let candidate = Placeholder(self.next);
            self.next += 1;
            if !self.source.contains(&candidate.marker()) {
                return candidate;
            }
            debug!("Marker {} already present in source, skipping", candidate);
        }
    }
}

/// Original surface form of a replaced phrase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CaseInfo {
    /// Matched content text
    pub content: String,
    /// Entire original chunk, stopwords included
    pub full: String,
    pub leading_stopword: String,
}

/// One marker with its translation and case metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub placeholder: Placeholder,
    pub translation: String,
    pub case_info: CaseInfo,
}

/// Output of preprocessing: the text sent to the translator plus the
/// substitutions to restore afterwards
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preprocessed {
    pub text: String,
    pub substitutions: Vec<Substitution>,
}

impl Preprocessed {
    /// Text left untouched, nothing to restore
    pub fn passthrough(text: &str) -> Self {
        Self {
            text: text.to_string(),
            substitutions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Marker to translation map
    pub fn replacements(&self) -> BTreeMap<String, String> {
        self.substitutions
            .iter()
            .map(|s| (s.placeholder.marker(), s.translation.clone()))
            .collect()
    }

    /// Marker to original case map
    pub fn original_cases(&self) -> BTreeMap<String, CaseInfo> {
        self.substitutions
            .iter()
            .map(|s| (s.placeholder.marker(), s.case_info.clone()))
            .collect()
    }
}

/// Replace every glossary phrase of `text` by a marker
pub fn preprocess(text: &str, store: &TerminologyStore, segmenter: &Segmenter<'_>) -> Preprocessed {
    if store.is_empty() || text.trim().is_empty() {
        return Preprocessed::passthrough(text);
    }

    let matcher = Matcher::new(store);
    let mut allocator = PlaceholderAllocator::new(text);
    let mut output = String::with_capacity(text.len());
    let mut substitutions = Vec::new();
    let mut cursor = 0;

    for span in segmenter.sentences(text) {
        if span.start < cursor || span.end > text.len() {
            debug!("Skipping overlapping sentence span {}..{}", span.start, span.end);
            continue;
        }
        let (Some(gap), Some(sentence)) = (text.get(cursor..span.start), text.get(span.start..span.end))
        else {
            continue;
        };
        output.push_str(gap);

        let phrases = segmenter.extract_phrases(sentence, store);
        let matched = matcher.match_phrases(phrases, |word| segmenter.is_stopword(word));
        let (rewritten, mut sentence_subs) = rewrite_sentence(sentence, matched, &mut allocator);

        output.push_str(&rewritten);
        substitutions.append(&mut sentence_subs);
        cursor = span.end;
    }
    output.push_str(&text[cursor..]);

    debug!("Preprocessed {} phrase(s)", substitutions.len());
    Preprocessed {
        text: output,
        substitutions,
    }
}

/// Rewrite one sentence right to left so pending offsets stay valid
fn rewrite_sentence(
    sentence: &str,
    mut matched: Vec<MatchedPhrase>,
    allocator: &mut PlaceholderAllocator<'_>,
) -> (String, Vec<Substitution>) {
    matched.sort_by(|a, b| b.phrase.chunk_start.cmp(&a.phrase.chunk_start));

    let (rewritten, _, substitutions) = matched.into_iter().fold(
        (sentence.to_string(), sentence.len(), Vec::new()),
        |(mut current, boundary, mut subs), m| {
            let phrase = m.phrase;
            if phrase.chunk_end > boundary || !phrase.is_well_formed() {
                debug!("Skipping overlapping phrase '{}'", phrase.full_text);
                return (current, boundary, subs);
            }

            let placeholder = allocator.next_placeholder();
            let replacement = format!(
                "{}{}{}",
                phrase.leading_stopwords,
                placeholder.marker(),
                phrase.trailing_stopwords
            );
            current.replace_range(phrase.chunk_start..phrase.chunk_end, &replacement);

            subs.push(Substitution {
                placeholder,
                translation: m.translation,
                case_info: CaseInfo {
                    content: phrase.content,
                    full: phrase.full_text,
                    leading_stopword: phrase.leading_stopwords,
                },
            });
            (current, phrase.chunk_start, subs)
        },
    );

    (rewritten, substitutions)
}
