//! # Analysis Pipeline
//!
//! One analysis = keywords (core heuristic) + summary and metadata
//! (summarizer) + confidence, stored through `AnalysisStore`.
//!
//! ## Failure Semantics
//!
//! - Invalid input fails before anything is summarized or stored.
//! - A summarizer failure degrades only its own item to the fallback
//!   summary/topics/sentiment and lowers its confidence. A summarizer that
//!   does not answer within the deadline counts as failed.
//! - A storage failure aborts the request. Items stored before it stay stored.

use crate::config::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::storage::AnalysisStore;
use crate::summarizer::{Summarizer, SummarizerError};
use gleaner_core::primitives::FALLBACK_SUMMARY;
use gleaner_core::{
    AnalysisMetadata, AnalysisRecord, GleanerError, NewAnalysis, compute_confidence,
    extract_keywords, validate_batch, validate_text,
};
use std::sync::Arc;
use std::time::Duration;

/// What a caller asked to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeInput {
    /// One text.
    Single(String),
    /// Several texts, analyzed in order.
    Batch(Vec<String>),
}

/// Summary and metadata for one text, plus whether the summarizer succeeded.
struct Description {
    summary: String,
    metadata: AnalysisMetadata,
    summarizer_ok: bool,
}

/// Runs the analysis pipeline against one summarizer and one store.
#[derive(Clone)]
pub struct Analyzer {
    summarizer: Arc<dyn Summarizer>,
    store: Arc<AnalysisStore>,
    summarizer_timeout: Duration,
}

impl Analyzer {
    /// Create a pipeline.
    pub fn new(summarizer: Arc<dyn Summarizer>, store: Arc<AnalysisStore>) -> Self {
        Self {
            summarizer,
            store,
            summarizer_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Bound the summary and metadata calls of one item by `timeout`.
    #[must_use]
    pub fn with_summarizer_timeout(mut self, timeout: Duration) -> Self {
        self.summarizer_timeout = timeout;
        self
    }

    /// The store analyses are written to.
    #[must_use]
    pub fn store(&self) -> &AnalysisStore {
        &self.store
    }

    /// Name of the active summarizer.
    #[must_use]
    pub fn summarizer_name(&self) -> &'static str {
        self.summarizer.name()
    }

    /// Ask the summarizer for summary and metadata concurrently.
    async fn describe(&self, text: &str) -> Description {
        let calls = async {
            tokio::try_join!(
                self.summarizer.summarize(text),
                self.summarizer.extract_metadata(text)
            )
        };
        let outcome = tokio::time::timeout(self.summarizer_timeout, calls)
            .await
            .unwrap_or_else(|_| Err(SummarizerError::TimedOut(self.summarizer_timeout)));
        match outcome {
            Ok((summary, metadata)) => Description {
                summary,
                metadata,
                summarizer_ok: true,
            },
            Err(e) => {
                tracing::warn!(
                    event = "summarizer_fallback",
                    summarizer = self.summarizer.name(),
                    error = %e,
                    "Summarizer failed, storing fallback values"
                );
                Description {
                    summary: FALLBACK_SUMMARY.to_string(),
                    metadata: AnalysisMetadata::fallback(),
                    summarizer_ok: false,
                }
            }
        }
    }

    /// Analyze and store one already validated, trimmed text.
    async fn analyze_validated(&self, text: &str) -> Result<AnalysisRecord, GleanerError> {
        let keywords = extract_keywords(text);
        let Description {
            summary,
            metadata,
            summarizer_ok,
        } = self.describe(text).await;

        let analysis = NewAnalysis {
            id: None,
            title: metadata.title,
            summary,
            topics: metadata.topics,
            sentiment: metadata.sentiment,
            keywords,
            confidence: compute_confidence(text, summarizer_ok),
            text: text.to_string(),
        };

        let record = self.store.insert(analysis).await?;
        tracing::debug!(id = %record.id, confidence = record.confidence, "Analysis stored");
        Ok(record)
    }

    /// Analyze and store one text.
    pub async fn analyze_one(&self, text: &str) -> Result<AnalysisRecord, GleanerError> {
        let text = validate_text(text)?;
        self.analyze_validated(text).await
    }

    /// Analyze and store every text of a batch, in order.
    ///
    /// The whole batch is validated before the first item is processed.
    pub async fn analyze_batch(
        &self,
        items: &[String],
    ) -> Result<Vec<AnalysisRecord>, GleanerError> {
        let texts = validate_batch(items)?;
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.analyze_validated(text).await?);
        }
        Ok(results)
    }

    /// Analyze either input form.
    pub async fn run(&self, input: &AnalyzeInput) -> Result<Vec<AnalysisRecord>, GleanerError> {
        match input {
            AnalyzeInput::Single(text) => Ok(vec![self.analyze_one(text).await?]),
            AnalyzeInput::Batch(items) => self.analyze_batch(items).await,
        }
    }

    /// Search stored analyses by topic or keyword.
    pub async fn search(&self, query: &str) -> Result<Vec<AnalysisRecord>, GleanerError> {
        self.store.search(query).await
    }
}

// =============================================================================
// TESTS
// =============================================================================
