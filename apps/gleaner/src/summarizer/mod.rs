//! # Summarizer Clients
//!
//! The language-model side of an analysis: a short summary plus
//! title/topics/sentiment metadata.
//!
//! Any implementation may fail. Callers never surface a summarizer error to
//! the client; they substitute fallback values instead (see `analyze`).
//!
//! ## Implementations
//!
//! - `MockSummarizer` - fixed, deterministic output (`USE_MOCK_LLM=true`)
//! - `GeminiSummarizer` - Google Gemini over its REST API

mod gemini;

pub use gemini::GeminiSummarizer;

use crate::config::Settings;
use async_trait::async_trait;
use gleaner_core::{AnalysisMetadata, GleanerError, Sentiment};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors from a summarizer call.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Cannot reach the model endpoint.
    #[error("Cannot connect to summarizer at {0}")]
    ConnectionFailed(String),

    /// The endpoint answered with a non-success status.
    #[error("Summarizer returned status {0}: {1}")]
    Status(u16, String),

    /// The response could not be interpreted.
    #[error("Malformed summarizer response: {0}")]
    Malformed(String),

    /// No answer within the deadline.
    #[error("Summarizer did not answer within {0:?}")]
    TimedOut(Duration),
}

impl From<SummarizerError> for GleanerError {
    fn from(e: SummarizerError) -> Self {
        GleanerError::Summarizer(e.to_string())
    }
}

// =============================================================================
// SUMMARIZER TRAIT
// =============================================================================

/// A capability that summarizes text and extracts metadata from it.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Summarize `text` in one to three sentences.
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError>;

    /// Extract title, exactly three topics, and sentiment.
    async fn extract_metadata(&self, text: &str) -> Result<AnalysisMetadata, SummarizerError>;
}

// =============================================================================
// MOCK SUMMARIZER
// =============================================================================

/// Summary returned by `MockSummarizer`.
pub const MOCK_SUMMARY: &str = "This is a mock summary of the provided text.";

/// Topics returned by `MockSummarizer`.
pub const MOCK_TOPICS: [&str; 3] = ["technology", "ai", "engineering"];

/// Deterministic summarizer for tests and offline use.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSummarizer;

#[async_trait]
impl Summarizer for MockSummarizer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn summarize(&self, _text: &str) -> Result<String, SummarizerError> {
        Ok(MOCK_SUMMARY.to_string())
    }

    async fn extract_metadata(&self, _text: &str) -> Result<AnalysisMetadata, SummarizerError> {
        Ok(AnalysisMetadata::new(
            None,
            MOCK_TOPICS.iter().map(|t| (*t).to_string()).collect(),
            Sentiment::Neutral,
        ))
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Select the summarizer named by the settings.
///
/// A real model without `GOOGLE_API_KEY` is a configuration error.
pub fn build_summarizer(settings: &Settings) -> Result<Arc<dyn Summarizer>, GleanerError> {
    if settings.use_mock_llm {
        return Ok(Arc::new(MockSummarizer));
    }
    let api_key = settings.google_api_key.clone().ok_or_else(|| {
        GleanerError::Config("GOOGLE_API_KEY is required to use the Gemini client.".to_string())
    })?;
    Ok(Arc::new(GeminiSummarizer::new(
        settings.gemini_base_url.clone(),
        settings.gemini_model.clone(),
        api_key,
        settings.http_timeout(),
    )?))
}

// =============================================================================
// TESTS
// =============================================================================
