//! # Innate Primitives
//!
//! Hardcoded runtime constants for Gleaner.
//!
//! The heuristics start with no learned state, only fixed logic.
//! These primitives are compiled into the binary and are immutable at runtime.
//! Changing any scoring constant changes test-visible output.

// =============================================================================
// KEYWORD SCORING
// =============================================================================

/// Number of keywords returned by `extract_keywords`.
pub const KEYWORD_LIMIT: usize = 3;

/// Tokens shorter than this are discarded.
pub const MIN_TOKEN_LENGTH: usize = 3;

/// Tokens at least this long receive the length bonus.
pub const LONG_TOKEN_LENGTH: usize = 7;

/// Keyword scores are kept in hundredths so ranking never compares floats.
pub const SCORE_SCALE: u64 = 100;

/// Bonus (hundredths) for tokens seen capitalized like a proper noun.
pub const CAPITALIZED_BONUS: u64 = 25;

/// Bonus (hundredths) for tokens of at least `LONG_TOKEN_LENGTH` characters.
pub const LONG_TOKEN_BONUS: u64 = 10;

// =============================================================================
// CONFIDENCE
// =============================================================================

/// Starting point of every confidence score.
pub const CONFIDENCE_BASE: f64 = 0.55;

/// Upper bound of the word-count contribution.
pub const LENGTH_BONUS_CAP: f64 = 0.30;

/// Added when the summarizer answered.
pub const SUMMARIZER_BONUS: f64 = 0.10;

/// Lowest confidence ever reported.
pub const CONFIDENCE_FLOOR: f64 = 0.50;

/// Highest confidence ever reported.
pub const CONFIDENCE_CEILING: f64 = 0.98;

// =============================================================================
// METADATA
// =============================================================================

/// Number of topics kept from summarizer metadata.
pub const TOPIC_COUNT: usize = 3;

/// Topic used to pad short topic lists.
pub const PADDING_TOPIC: &str = "general";

/// Summary stored when the summarizer is unavailable.
pub const FALLBACK_SUMMARY: &str = "LLM unavailable. Summary could not be generated.";

/// Topics stored when the summarizer is unavailable.
pub const FALLBACK_TOPICS: [&str; TOPIC_COUNT] = ["general", "unknown", "llm-failure"];

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length (bytes) of one text to analyze.
///
/// This prevents memory exhaustion from malicious or malformed input.
pub const MAX_TEXT_LENGTH: usize = 65536;

/// Maximum number of texts in one batch request.
pub const MAX_BATCH_ITEMS: usize = 100;

/// Number of recent records returned by a blank remote search.
pub const RECENT_RECORDS_LIMIT: usize = 100;
