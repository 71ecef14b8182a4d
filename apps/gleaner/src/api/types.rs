//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use crate::analyze::AnalyzeInput;
use gleaner_core::{AnalysisRecord, GleanerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ROOT RESPONSE
// =============================================================================

/// Service metadata returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub name: String,
    pub endpoints: BTreeMap<String, String>,
}

impl RootResponse {
    /// Describe the endpoints mounted under `prefix`.
    pub fn new(name: &str, prefix: &str) -> Self {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            format!("POST {}/analyze", prefix),
            "Analyze single text or batch.".to_string(),
        );
        endpoints.insert(
            format!("GET {}/search?topic=xyz", prefix),
            "Search analyses by topic or keyword.".to_string(),
        );
        Self {
            name: name.to_string(),
            endpoints,
        }
    }
}

// =============================================================================
// ANALYZE REQUEST/RESPONSE
// =============================================================================

/// Analyze request: exactly one of `text` or `items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

impl AnalyzeRequest {
    /// Request for one text.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            items: None,
        }
    }

    /// Request for a batch.
    pub fn batch(items: Vec<String>) -> Self {
        Self {
            text: None,
            items: Some(items),
        }
    }

    /// Resolve which input form was supplied.
    ///
    /// When both keys are present, a blank `text` or an empty `items` counts
    /// as absent; if neither carries data, `items` wins. Content is validated
    /// later by the pipeline.
    pub fn into_input(self) -> Result<AnalyzeInput, GleanerError> {
        match (self.text, self.items) {
            (Some(text), Some(items)) => match (text.trim().is_empty(), items.is_empty()) {
                (false, false) => Err(GleanerError::InvalidInput(
                    "Provide either 'text' or 'items', not both.".to_string(),
                )),
                (false, true) => Ok(AnalyzeInput::Single(text)),
                (true, _) => Ok(AnalyzeInput::Batch(items)),
            },
            (None, Some(items)) => Ok(AnalyzeInput::Batch(items)),
            (Some(text), None) => Ok(AnalyzeInput::Single(text)),
            (None, None) => Err(GleanerError::InvalidInput(
                "Provide 'text' or 'items' with data.".to_string(),
            )),
        }
    }
}

/// Results of an analyze or search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub results: Vec<AnalysisRecord>,
}

/// Analyze response.
pub type AnalyzeResponse = ResultsResponse;

/// Search response.
pub type SearchResponse = ResultsResponse;

// =============================================================================
// SEARCH PARAMETERS
// =============================================================================

/// Query string of `GET /search`. A missing topic behaves as blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub topic: String,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error body for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
