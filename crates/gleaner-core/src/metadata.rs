//! # Summarizer Metadata
//!
//! Normalization of the structured metadata a summarizer returns.
//!
//! Model output is untrusted: it may be wrapped in a code fence, carry
//! extra fields, or get types wrong. `parse_model_metadata` accepts a JSON
//! object and coerces it into an `AnalysisMetadata` with exactly
//! `TOPIC_COUNT` topics and a valid sentiment. Anything that is not a JSON
//! object is an error, which the pipeline treats as a summarizer failure.

use crate::primitives::{FALLBACK_TOPICS, PADDING_TOPIC, TOPIC_COUNT};
use crate::{GleanerError, Sentiment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title, topics and sentiment of a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub title: Option<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
}

impl AnalysisMetadata {
    /// Build metadata, normalizing topics to `TOPIC_COUNT` entries.
    #[must_use]
    pub fn new(title: Option<String>, topics: Vec<String>, sentiment: Sentiment) -> Self {
        Self {
            title,
            topics: normalize_topics(topics),
            sentiment,
        }
    }

    /// Values stored when the summarizer is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            title: None,
            topics: FALLBACK_TOPICS.iter().map(|t| (*t).to_string()).collect(),
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Truncate to `TOPIC_COUNT`, or pad with `PADDING_TOPIC`.
#[must_use]
pub fn normalize_topics(mut topics: Vec<String>) -> Vec<String> {
    topics.truncate(TOPIC_COUNT);
    while topics.len() < TOPIC_COUNT {
        topics.push(PADDING_TOPIC.to_string());
    }
    topics
}

/// Remove a surrounding code fence such as "```json ... ```".
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let unfenced = trimmed.trim_matches('`');
    unfenced.strip_prefix("json").unwrap_or(unfenced)
}

/// Parse and normalize the metadata text produced by a model.
pub fn parse_model_metadata(raw: &str) -> Result<AnalysisMetadata, GleanerError> {
    let cleaned = strip_code_fence(raw);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| GleanerError::Summarizer(format!("metadata is not valid JSON: {e}")))?;
    let Value::Object(fields) = value else {
        return Err(GleanerError::Summarizer(
            "metadata is not a JSON object".to_string(),
        ));
    };

    let title = match fields.get("title") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    };

    let topics: Vec<String> = match fields.get("topics") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|t| t.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    let sentiment = fields
        .get("sentiment")
        .and_then(Value::as_str)
        .and_then(Sentiment::from_label)
        .unwrap_or_default();

    Ok(AnalysisMetadata::new(title, topics, sentiment))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let meta = parse_model_metadata(
            r#"{"title":"Rust","topics":["systems","safety","speed"],"sentiment":"positive"}"#,
        )
        .expect("parse");
        assert_eq!(meta.title.as_deref(), Some("Rust"));
        assert_eq!(meta.topics, vec!["systems", "safety", "speed"]);
        assert_eq!(meta.sentiment, Sentiment::Positive);
    }

    #[test]
    fn strips_fenced_output() {
        let raw = "```json\n{\"title\":null,\"topics\":[\"a\",\"b\",\"c\"],\"sentiment\":\"negative\"}\n```";
        let meta = parse_model_metadata(raw).expect("parse");
        assert_eq!(meta.title, None);
        assert_eq!(meta.sentiment, Sentiment::Negative);
    }

    #[test]
    fn pads_and_truncates_topics() {
        let short = parse_model_metadata(r#"{"topics":["one"]}"#).expect("parse");
        assert_eq!(short.topics, vec!["one", "general", "general"]);

        let long = parse_model_metadata(r#"{"topics":["a","b","c","d","e"]}"#).expect("parse");
        assert_eq!(long.topics, vec!["a", "b", "c"]);
    }

    #[test]
    fn drops_non_string_values() {
        let meta =
            parse_model_metadata(r#"{"title":42,"topics":[1,"x",null],"sentiment":"Happy"}"#)
                .expect("parse");
        assert_eq!(meta.title, None);
        assert_eq!(meta.topics, vec!["x", "general", "general"]);
        assert_eq!(meta.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(parse_model_metadata("not json at all").is_err());
        assert!(parse_model_metadata("[1,2,3]").is_err());
        assert!(parse_model_metadata("").is_err());
    }

    #[test]
    fn fallback_values() {
        let meta = AnalysisMetadata::fallback();
        assert_eq!(meta.title, None);
        assert_eq!(meta.topics, vec!["general", "unknown", "llm-failure"]);
        assert_eq!(meta.sentiment, Sentiment::Neutral);
    }
}
