//! # Gemini Client
//!
//! Calls `POST {base}/v1beta/models/{model}:generateContent` with the prompt
//! and user text as two parts of one user turn.

use super::{Summarizer, SummarizerError};
use crate::http::build_client;
use async_trait::async_trait;
use gleaner_core::{AnalysisMetadata, GleanerError, parse_model_metadata};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const SUMMARY_PROMPT: &str = "You are a precise assistant. Summarize the user's text in 1-3 sentences. \
     Be concise and neutral.";

const METADATA_PROMPT: &str = "Extract the following as pure JSON (no extra text):\n\
{\n  \"title\": string|null,\n  \"topics\": string[3],\n  \"sentiment\": \"positive\"|\"neutral\"|\"negative\"\n}\n\
Rules:\n\
- \"title\" should be a short title if one can be inferred; otherwise null.\n\
- \"topics\" must be exactly 3 short, general themes.\n\
- \"sentiment\" is overall tone (positive/neutral/negative).\n\
Return ONLY the JSON.";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate.
fn response_text(response: GenerateResponse) -> Result<String, SummarizerError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SummarizerError::Malformed(
            "response contains no text".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// CLIENT
// =============================================================================

/// Summarizer backed by the Gemini REST API.
#[derive(Clone)]
pub struct GeminiSummarizer {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiSummarizer {
    /// Create a client for `model` at `base_url`; each call fails after `timeout`.
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, GleanerError> {
        Ok(Self {
            http: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send one prompt plus the user text and return the model's text.
    async fn generate(&self, prompt: &str, text: &str) -> Result<String, SummarizerError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }, { "text": text }],
            }],
        });

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizerError::ConnectionFailed(format!("{}: {e}", self.base_url)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SummarizerError::Status(status.as_u16(), body));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| SummarizerError::Malformed(e.to_string()))?;
        response_text(parsed)
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        self.generate(SUMMARY_PROMPT, text).await
    }

    async fn extract_metadata(&self, text: &str) -> Result<AnalysisMetadata, SummarizerError> {
        let raw = self.generate(METADATA_PROMPT, text).await?;
        parse_model_metadata(&raw).map_err(|e| SummarizerError::Malformed(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
