/*!
 * Static English stopword classification.
 *
 * Used by the rule-based NLP engine and by the matcher's stopword-stripping
 * retry when no engine is configured.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Words that may open a noun chunk (articles, demonstratives, possessives,
/// quantifiers)
pub const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "no", "every", "each", "all", "both", "another", "such", "what",
    "which", "whose", "either", "neither", "several", "many", "much", "few", "other", "own",
    "whatever", "whichever",
];

/// Pronouns form a chunk of their own
pub const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "yourselves", "themselves", "mine", "yours",
    "hers", "ours", "theirs", "who", "whom", "someone", "something", "anyone", "anything",
    "everyone", "everything", "nobody", "nothing", "noone", "somebody", "anybody", "everybody",
];

/// Remaining function words: auxiliaries, prepositions, conjunctions,
/// adverbs
const FUNCTION_WORDS: &[&str] = &[
    // be / have / do
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "done",
    // modals
    "will", "would", "shall", "should", "may", "might", "can", "could", "must", "ca",
    // prepositions
    "to", "of", "in", "for", "on", "with", "at", "by", "from", "into", "onto", "about", "above",
    "below", "across", "after", "afterwards", "against", "along", "among", "amongst", "around",
    "before", "behind", "beside", "besides", "between", "beyond", "down", "during", "except",
    "inside", "near", "off", "out", "over", "per", "since", "through", "throughout", "thru",
    "toward", "towards", "under", "until", "up", "upon", "via", "within", "without",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "as", "because", "though",
    "although", "unless", "whereas", "whether", "while", "whereby", "wherein", "whereupon",
    // interrogatives and relatives
    "when", "where", "why", "how", "whence", "whither", "wherever", "whenever", "however",
    // adverbs and particles
    "not", "very", "also", "just", "too", "more", "most", "less", "least", "only", "even",
    "ever", "never", "always", "often", "sometimes", "already", "again", "still", "almost",
    "quite", "rather", "really", "perhaps", "therefore", "thus", "hence", "otherwise",
    "indeed", "instead", "meanwhile", "moreover", "nevertheless", "nonetheless", "here",
    "there", "now", "once", "twice", "else", "elsewhere", "somewhere", "anywhere",
    "everywhere", "nowhere", "together", "well", "back", "away", "yes", "please", "today",
    "tomorrow", "yesterday", "tonight", "soon", "later",
    // contractions split off by tokenizers
    "n't", "'s", "'re", "'ve", "'ll", "'d", "'m", "\u{2019}s",
    // contractions kept whole by the rule-based tokenizer
    "don't", "doesn't", "didn't", "can't", "won't", "isn't", "aren't", "wasn't", "weren't",
    "it's", "i'm", "you're", "we're", "they're", "that's", "there's", "let's",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    DETERMINERS
        .iter()
        .chain(PRONOUNS)
        .chain(FUNCTION_WORDS)
        .copied()
        .collect()
});

static DETERMINER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DETERMINERS.iter().copied().collect());

static PRONOUN_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| PRONOUNS.iter().copied().collect());

/// Whether a word (any case) is a stopword
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}

pub fn is_determiner(word: &str) -> bool {
    DETERMINER_SET.contains(word.to_lowercase().as_str())
}

pub fn is_pronoun(word: &str) -> bool {
    PRONOUN_SET.contains(word.to_lowercase().as_str())
}

/// Remove stopwords from a whitespace-separated phrase, lower-casing the rest
pub fn strip_stopwords(phrase: &str, is_stop: impl Fn(&str) -> bool) -> String {
    phrase
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !is_stop(word))
        .collect::<Vec<_>>()
        .join(" ")
}
