//! # Core Type Definitions
//!
//! This module contains all core types for Gleaner:
//! - Record identifiers (`RecordId`)
//! - The persisted unit (`NewAnalysis` before storage, `AnalysisRecord` after)
//! - Sentiment classification (`Sentiment`)
//! - Error types (`GleanerError`)
//!
//! ## Field Names
//!
//! Persisted field names are stable across every storage backend:
//! `id`, `title`, `summary`, `topics`, `sentiment`, `keywords`,
//! `confidence`, `text`. Extra columns returned by a backend
//! (for example `created_at`) are ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIER
// =============================================================================

/// Opaque unique identifier of a stored analysis.
///
/// The in-memory store generates random v4 UUIDs; the remote store returns
/// whatever the server assigned. Callers must not rely on the format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create a record id from any string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// SENTIMENT
// =============================================================================

/// Overall tone of an analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse the exact lowercase label. Anything else is `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }

    /// The lowercase label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ANALYSIS RECORDS
// =============================================================================

/// An analysis that has not been stored yet.
///
/// `id` is usually `None`; the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub summary: String,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub confidence: f64,
    pub text: String,
}

impl NewAnalysis {
    /// Attach an identifier, producing the stored form.
    #[must_use]
    pub fn into_record(self, id: RecordId) -> AnalysisRecord {
        AnalysisRecord {
            id,
            title: self.title,
            summary: self.summary,
            topics: self.topics,
            sentiment: self.sentiment,
            keywords: self.keywords,
            confidence: self.confidence,
            text: self.text,
        }
    }
}

/// A stored analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: RecordId,
    pub title: Option<String>,
    pub summary: String,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub confidence: f64,
    pub text: String,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in Gleaner.
///
/// - No silent failures
/// - Use `Result<T, GleanerError>` for fallible operations
/// - Summarizer failures are recoverable; the pipeline degrades to defaults
#[derive(Debug, Error)]
pub enum GleanerError {
    /// Input text is empty or whitespace-only.
    #[error("Empty input text.")]
    EmptyText,

    /// The request shape or size is invalid.
    #[error("{0}")]
    InvalidInput(String),

    /// The summarization capability failed or returned malformed output.
    #[error("Summarizer failure: {0}")]
    Summarizer(String),

    /// The storage backend is not configured or cannot be reached.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An insert did not return the stored row.
    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl GleanerError {
    /// Whether the error was caused by the caller's input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyText | Self::InvalidInput(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
