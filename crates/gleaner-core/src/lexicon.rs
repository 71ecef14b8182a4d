//! # Lexicon
//!
//! Closed word lists used by keyword extraction.
//!
//! Both sets are process-wide, read-only, and built on first use.

use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Function words, pronouns, and forms of "to be" / "to have" / modal verbs.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "while", "for", "on",
    "in", "to", "of", "by", "with", "as", "at", "from", "that", "this", "these", "those", "it",
    "its", "be", "is", "are", "was", "were", "been", "being", "am", "i", "you", "he", "she",
    "they", "them", "we", "us", "our", "your", "his", "her", "their", "my", "mine", "yours",
    "ours", "theirs", "do", "does", "did", "done", "have", "has", "had", "having", "will",
    "would", "can", "could", "should", "shall", "may", "might", "must", "not", "no", "yes", "so",
    "than", "too", "very", "there", "here", "what", "which", "who", "whom", "whose", "how", "why",
    "where", "into", "over", "under", "again", "further", "once", "about", "both", "between",
    "out", "up", "down", "off", "above", "below", "because", "until", "after", "before",
    "during", "each", "few", "more", "most", "other", "some", "such", "only", "own", "same", "s",
    "t", "d", "ll", "m", "o", "re", "ve", "y", "don", "shouldn", "now",
];

/// Domain-agnostic verbs that rarely carry topical meaning.
const COMMON_VERBS: &[&str] = &[
    "use", "build", "create", "make", "run", "scale", "deploy", "call", "send", "fetch",
    "return", "process", "analyze", "extract", "store", "search", "handle", "test",
    "containerize", "support", "add", "include", "design", "choose", "implement", "prefer",
    "focus", "integrate", "accept", "provide", "generate", "score", "classify", "view",
];

static STOPWORD_SET: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

static COMMON_VERB_SET: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| COMMON_VERBS.iter().copied().collect());

/// Check whether a lowercase token is a stopword.
#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Check whether a lowercase token is a common verb.
#[must_use]
pub fn is_common_verb(token: &str) -> bool {
    COMMON_VERB_SET.contains(token)
}

/// Check whether a lowercase token is filtered by either list.
#[must_use]
pub fn is_filtered(token: &str) -> bool {
    is_stopword(token) || is_common_verb(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwords_cover_function_words() {
        for word in ["the", "have", "should", "theirs", "shouldn", "now"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
        assert!(!is_stopword("model"));
    }

    #[test]
    fn common_verbs_are_listed() {
        assert!(is_common_verb("build"));
        assert!(is_common_verb("containerize"));
        assert!(!is_common_verb("love"));
    }

    #[test]
    fn lists_have_no_duplicates() {
        assert_eq!(STOPWORD_SET.len(), STOPWORDS.len());
        assert_eq!(COMMON_VERB_SET.len(), COMMON_VERBS.len());
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert!(!is_filtered("The"));
        assert!(is_filtered("the"));
    }
}
