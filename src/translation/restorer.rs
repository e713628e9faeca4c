/*!
 * Restoration of glossary translations into translator output.
 *
 * Each marker is located independently, cased according to the original
 * surface form and its sentence position, then replaced. A final pass
 * capitalizes sentence starts the translator may have lowered.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::placeholder::{CaseInfo, Placeholder, Substitution};

/// Sentence punctuation, whitespace run, then a lower-case letter
static SENTENCE_LOWER_START_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?]\s+)(\p{Ll})").expect("Invalid sentence start regex"));

const SENTENCE_PREFIXES: [&str; 3] = [". ", "! ", "? "];

/// Casing applied to a restored translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    Upper,
    Title,
    Capitalized,
    Lower,
}

impl CasePolicy {
    /// Derive the policy from the original surface form
    ///
    /// Precedence: all-caps chunk, title-case content, leading capital on the
    /// content or its leading stopword, lower case.
    pub fn from_case_info(info: &CaseInfo) -> Self {
        let full = if info.full.is_empty() {
            info.content.as_str()
        } else {
            info.full.as_str()
        };
        if full.is_empty() {
            return CasePolicy::Lower;
        }

        if is_ambiguous(&info.content) {
            debug!("Ambiguous casing for '{}', applying standard precedence", info.content);
        }

        if is_all_upper(full) {
            CasePolicy::Upper
        } else if is_title(&info.content) || every_word_capitalized(&info.content) {
            CasePolicy::Title
        } else if starts_upper(&info.content) || starts_upper(info.leading_stopword.trim_start()) {
            CasePolicy::Capitalized
        } else {
            CasePolicy::Lower
        }
    }

    pub fn apply(&self, translation: &str) -> String {
        match self {
            CasePolicy::Upper => translation.to_uppercase(),
            CasePolicy::Title => title_case(translation),
            CasePolicy::Capitalized => {
                let mut chars = translation.chars();
                match chars.next() {
                    Some(first) => {
                        let rest = chars.as_str().to_lowercase();
                        first.to_uppercase().chain(rest.chars()).collect()
                    }
                    None => String::new(),
                }
            }
            CasePolicy::Lower => translation.to_lowercase(),
        }
    }
}

fn starts_upper(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// At least one cased character and no lower-case ones
fn is_all_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Every cased run starts upper-case and continues lower-case
fn is_title(text: &str) -> bool {
    let mut previous_cased = false;
    let mut has_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            has_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            has_cased = true;
        } else {
            previous_cased = false;
        }
    }

    has_cased
}

fn every_word_capitalized(text: &str) -> bool {
    let mut words = text.split_whitespace().peekable();
    words.peek().is_some() && words.all(starts_upper)
}

/// Single-letter content or upper-case letters after the first position
fn is_ambiguous(content: &str) -> bool {
    content.chars().filter(|c| c.is_alphabetic()).count() == 1
        || content
            .split_whitespace()
            .any(|word| word.chars().skip(1).any(char::is_uppercase) && word.chars().any(char::is_lowercase))
}

/// Upper-case letters that follow a non-letter, lower-case the rest
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alpha = false;

    for c in text.chars() {
        if previous_alpha {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_alpha = c.is_alphabetic();
    }

    result
}

/// Upper-case the first character only
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `pos` opens the text or follows `". "`, `"! "` or `"? "`
pub fn is_sentence_start(text: &str, pos: usize) -> bool {
    pos == 0
        || text
            .get(..pos)
            .is_some_and(|before| SENTENCE_PREFIXES.iter().any(|prefix| before.ends_with(prefix)))
}

/// Capitalize the first character and every lower-case letter following
/// sentence punctuation plus whitespace
pub fn ensure_sentence_capitalization(text: &str) -> String {
    let capitalized = capitalize_first(text);
    SENTENCE_LOWER_START_REGEX
        .replace_all(&capitalized, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

/// Result of restoring markers into translated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub text: String,
    /// Number of markers found and replaced
    pub restored: usize,
    /// Markers the translator dropped or altered
    pub missing: Vec<Placeholder>,
}

/// Substitute translations for markers in `translated`
pub fn restore(translated: &str, substitutions: &[Substitution]) -> Restored {
    let mut text = translated.to_string();
    let mut restored = 0;
    let mut missing = Vec::new();

    for substitution in substitutions {
        let marker = substitution.placeholder.marker();
        let Some(pos) = text.find(&marker) else {
            warn!("Placeholder {} not found in translated text", marker);
            missing.push(substitution.placeholder);
            continue;
        };

        let policy = CasePolicy::from_case_info(&substitution.case_info);
        let mut cased = policy.apply(&substitution.translation);
        if is_sentence_start(&text, pos) {
            cased = capitalize_first(&cased);
        }

        debug!("Restoring {} as '{}' ({:?})", marker, cased, policy);
        text = text.replace(&marker, &cased);
        restored += 1;
    }

    Restored {
        text: ensure_sentence_capitalization(&text),
        restored,
        missing,
    }
}
