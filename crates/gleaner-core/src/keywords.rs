//! # Keyword Extraction
//!
//! Heuristic extraction of noun-like keywords from unstructured text.
//!
//! Tokens are maximal runs of `[A-Za-z][A-Za-z\-']+`. Each token is
//! lowercased, stripped of trailing apostrophes and a possessive `'s`, and
//! dropped when it is a stopword, a common verb, or shorter than
//! `MIN_TOKEN_LENGTH`. Survivors are scored by frequency with small bonuses
//! for proper-noun capitalization and for length.
//!
//! ## Determinism
//!
//! Scores are integers in hundredths, and ties are broken by frequency and
//! then by the token itself, so identical input always yields identical
//! output.

use crate::lexicon;
use crate::primitives::{
    CAPITALIZED_BONUS, KEYWORD_LIMIT, LONG_TOKEN_BONUS, LONG_TOKEN_LENGTH, MIN_TOKEN_LENGTH,
    SCORE_SCALE,
};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

// The pattern is a literal; compiling it cannot fail.
#[allow(clippy::unwrap_used)]
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z\-']+").unwrap());

const CURLY_APOSTROPHE: char = '\u{2019}';

// =============================================================================
// SCORED KEYWORD
// =============================================================================

/// A candidate keyword with its ranking inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredKeyword {
    /// Normalized lowercase token.
    pub token: String,
    /// Occurrences of the normalized token in the text.
    pub frequency: u64,
    /// `frequency` plus bonuses, in hundredths.
    pub score_hundredths: u64,
}

impl fmt::Display for ScoredKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (freq {}, score {}.{:02})",
            self.token,
            self.frequency,
            self.score_hundredths / SCORE_SCALE,
            self.score_hundredths % SCORE_SCALE
        )
    }
}

// =============================================================================
// TOKENIZATION
// =============================================================================

/// Iterate over the raw tokens of a text, in order.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Lowercase a raw token and strip trailing apostrophes and possessives.
#[must_use]
pub fn normalize_token(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let trimmed = lower
        .trim_end_matches('\'')
        .trim_end_matches(CURLY_APOSTROPHE);
    let base = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("\u{2019}s"))
        .unwrap_or(trimmed);
    base.to_string()
}

/// First letter uppercase, every other cased letter lowercase.
///
/// "Developers" qualifies; "AI", "OpenAI" and "A-" do not.
fn is_capitalized(raw: &str) -> bool {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest = chars.as_str();
    first.is_ascii_uppercase()
        && rest.chars().any(|c| c.is_ascii_lowercase())
        && !rest.chars().any(|c| c.is_ascii_uppercase())
}

fn is_candidate(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_LENGTH && !lexicon::is_filtered(token)
}

// =============================================================================
// RANKING
// =============================================================================

/// Rank every surviving token of `text` and keep the best `limit`.
///
/// Order: score descending, then frequency descending, then token ascending.
#[must_use]
pub fn rank_keywords(text: &str, limit: usize) -> Vec<ScoredKeyword> {
    if text.trim().is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut capitalized: BTreeSet<String> = BTreeSet::new();

    for raw in tokenize(text) {
        // The capitalized set holds the raw lowercase form, before possessive stripping.
        if is_capitalized(raw) {
            capitalized.insert(raw.to_ascii_lowercase());
        }
        let token = normalize_token(raw);
        if is_candidate(&token) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut scored: Vec<ScoredKeyword> = counts
        .into_iter()
        .map(|(token, frequency)| {
            let mut score = frequency.saturating_mul(SCORE_SCALE);
            if capitalized.contains(&token) {
                score = score.saturating_add(CAPITALIZED_BONUS);
            }
            if token.chars().count() >= LONG_TOKEN_LENGTH {
                score = score.saturating_add(LONG_TOKEN_BONUS);
            }
            ScoredKeyword {
                token,
                frequency,
                score_hundredths: score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score_hundredths
            .cmp(&a.score_hundredths)
            .then_with(|| b.frequency.cmp(&a.frequency))
            .then_with(|| a.token.cmp(&b.token))
    });
    scored.truncate(limit);
    scored
}

/// Extract up to three noun-like keywords, best first.
///
/// Returns an empty list for blank input or when nothing survives filtering.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    rank_keywords(text, KEYWORD_LIMIT)
        .into_iter()
        .map(|k| k.token)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "OpenAI released a powerful model. The model helps developers build AI products. Developers love the model.";

    #[test]
    fn blank_input_yields_nothing() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t ").is_empty());
    }

    #[test]
    fn only_filtered_words_yield_nothing() {
        assert!(extract_keywords("The and of to build it is").is_empty());
        assert!(extract_keywords("42 + 17 = 59 !!").is_empty());
    }

    #[test]
    fn article_ranks_frequent_tokens_first() {
        assert_eq!(
            extract_keywords(ARTICLE),
            vec!["model", "developers", "powerful"]
        );
    }

    #[test]
    fn ranking_exposes_scores() {
        let ranked = rank_keywords(ARTICLE, 10);
        assert_eq!(ranked[0].token, "model");
        assert_eq!(ranked[0].frequency, 3);
        assert_eq!(ranked[0].score_hundredths, 300);
        // 2 occurrences + capitalized + long
        assert_eq!(ranked[1].token, "developers");
        assert_eq!(ranked[1].score_hundredths, 235);
        assert_eq!(ranked.len(), 8);
    }

    #[test]
    fn capitalization_breaks_frequency_ties() {
        assert_eq!(
            extract_keywords("london london Paris paris"),
            vec!["paris", "london"]
        );
    }

    #[test]
    fn possessives_and_trailing_apostrophes_are_stripped() {
        assert_eq!(normalize_token("Google's"), "google");
        assert_eq!(normalize_token("students'"), "students");
        assert_eq!(normalize_token("rock'n'roll"), "rock'n'roll");
        assert_eq!(normalize_token("Google\u{2019}s"), "google");
        assert_eq!(normalize_token("students\u{2019}"), "students");
    }

    #[test]
    fn possessive_tokens_do_not_inherit_capital_bonus() {
        // "Google's" marks "google's" as capitalized, not "google", so the
        // tie with "engine" falls to alphabetical order.
        assert_eq!(
            extract_keywords("Google's engine. Google's engine."),
            vec!["engine", "google"]
        );
    }

    #[test]
    fn hyphenated_runs_stay_whole() {
        let keywords = extract_keywords("A state-of-the-art compiler");
        assert_eq!(keywords, vec!["compiler", "state-of-the-art"]);
    }

    #[test]
    fn short_tokens_are_dropped() {
        assert!(extract_keywords("AI ML go").is_empty());
    }

    #[test]
    fn capitalized_detection() {
        assert!(is_capitalized("Developers"));
        assert!(is_capitalized("Rock-n-roll"));
        assert!(!is_capitalized("AI"));
        assert!(!is_capitalized("OpenAI"));
        assert!(!is_capitalized("model"));
        assert!(!is_capitalized("A-"));
    }

    #[test]
    fn result_is_unique_and_bounded() {
        let text = "alpha beta gamma delta alpha beta gamma delta epsilon";
        let keywords = extract_keywords(text);
        assert_eq!(keywords.len(), 3);
        let unique: BTreeSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn display_formats_hundredths() {
        let k = ScoredKeyword {
            token: "developers".into(),
            frequency: 2,
            score_hundredths: 235,
        };
        assert_eq!(k.to_string(), "developers (freq 2, score 2.35)");
    }
}
