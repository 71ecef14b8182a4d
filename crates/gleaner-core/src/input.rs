//! # Input Validation
//!
//! Validation of texts before analysis.
//!
//! - Reject empty and whitespace-only text
//! - Reject oversized text and oversized batches
//! - Trim surrounding whitespace; the trimmed text is what gets stored

use crate::GleanerError;
use crate::primitives::{MAX_BATCH_ITEMS, MAX_TEXT_LENGTH};

/// Validate one text and return it trimmed.
pub fn validate_text(text: &str) -> Result<&str, GleanerError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GleanerError::EmptyText);
    }
    if trimmed.len() > MAX_TEXT_LENGTH {
        return Err(GleanerError::InvalidInput(format!(
            "Text length {} exceeds maximum {} bytes",
            trimmed.len(),
            MAX_TEXT_LENGTH
        )));
    }
    Ok(trimmed)
}

/// Validate every text of a batch up front.
///
/// Nothing is analyzed unless the whole batch is valid.
pub fn validate_batch(items: &[String]) -> Result<Vec<&str>, GleanerError> {
    if items.is_empty() {
        return Err(GleanerError::InvalidInput(
            "Batch 'items' must be a non-empty list of strings.".to_string(),
        ));
    }
    if items.len() > MAX_BATCH_ITEMS {
        return Err(GleanerError::InvalidInput(format!(
            "Batch of {} items exceeds maximum {}",
            items.len(),
            MAX_BATCH_ITEMS
        )));
    }
    items.iter().map(|t| validate_text(t)).collect()
}
