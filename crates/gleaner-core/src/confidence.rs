//! # Confidence Module
//!
//! Confidence scoring for a finished analysis.
//!
//! - Base score of 0.55
//! - Grows with the logarithm of the word count, capped at +0.30
//! - +0.10 when the summarizer answered
//! - Rounded to 3 decimals and clamped to [0.50, 0.98]
//!
//! This is the one place in the core that works in floating point; the
//! result is rounded so it is stable across platforms.
#![allow(clippy::float_arithmetic)]

use crate::primitives::{
    CONFIDENCE_BASE, CONFIDENCE_CEILING, CONFIDENCE_FLOOR, LENGTH_BONUS_CAP, SUMMARIZER_BONUS,
};

/// Number of whitespace-separated words, never less than 1.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}

/// Word-count contribution: `min(0.30, log10(n + 9) / 10)`.
#[must_use]
pub fn length_bonus(words: usize) -> f64 {
    ((words as f64 + 9.0).log10() / 10.0).min(LENGTH_BONUS_CAP)
}

/// Round to three decimal places.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Compute the confidence of an analysis of `text`.
///
/// `summarizer_ok` is false when the summarizer failed and fallback values
/// were stored instead.
#[must_use]
pub fn compute_confidence(text: &str, summarizer_ok: bool) -> f64 {
    let bonus = if summarizer_ok { SUMMARIZER_BONUS } else { 0.0 };
    let raw = CONFIDENCE_BASE + length_bonus(word_count(text)) + bonus;
    round3(raw).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

// =============================================================================
// TESTS
// =============================================================================
