//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::TextSource;
use crate::analyze::{AnalyzeInput, Analyzer};
use crate::api::{self, AppState};
use crate::config::Settings;
use crate::storage::AnalysisStore;
use crate::summarizer::build_summarizer;
use gleaner_core::{AnalysisRecord, GleanerError, compute_confidence, rank_keywords};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// INPUT FILES
// =============================================================================

/// Maximum size of a text file given with `--file` (1 MiB).
///
/// Content beyond the per-text limit is still rejected by validation.
const MAX_INPUT_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file path: resolve symlinks and "..", require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, GleanerError> {
    let canonical = path.canonicalize().map_err(|e| {
        GleanerError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(GleanerError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), GleanerError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| GleanerError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(GleanerError::InvalidInput(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

impl TextSource {
    /// Return the inline text, or read the file.
    pub fn read(&self) -> Result<String, GleanerError> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        let path = self
            .file
            .as_deref()
            .ok_or_else(|| GleanerError::InvalidInput("Provide --text or --file.".to_string()))?;

        let validated = validate_file_path(path)?;
        validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;
        std::fs::read_to_string(&validated)
            .map_err(|e| GleanerError::Io(format!("Read file: {}", e)))
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn print_record(record: &AnalysisRecord) {
    println!("Id:         {}", record.id);
    println!("Title:      {}", record.title.as_deref().unwrap_or("-"));
    println!("Summary:    {}", record.summary);
    println!("Topics:     {}", record.topics.join(", "));
    println!("Sentiment:  {}", record.sentiment);
    println!("Keywords:   {}", record.keywords.join(", "));
    println!("Confidence: {:.3}", record.confidence);
}

/// Build the pipeline named by the settings.
fn build_analyzer(settings: &Settings) -> Result<Analyzer, GleanerError> {
    let summarizer = build_summarizer(settings)?;
    let store = AnalysisStore::from_settings(settings)?;
    Ok(Analyzer::new(summarizer, Arc::new(store))
        .with_summarizer_timeout(settings.http_timeout()))
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(settings: Settings, host: &str, port: u16) -> Result<(), GleanerError> {
    let analyzer = build_analyzer(&settings)?;
    let prefix = settings.api_prefix.clone();

    tracing::info!(
        summarizer = analyzer.summarizer_name(),
        storage = analyzer.store().backend_name(),
        env = %settings.env,
        "Backends selected"
    );

    println!("{} Starting...", settings.app_name);
    println!();
    println!("Configuration:");
    println!("  Host:       {}", host);
    println!("  Port:       {}", port);
    println!("  Summarizer: {}", analyzer.summarizer_name());
    println!("  Storage:    {}", analyzer.store().backend_name());
    println!();
    println!("Endpoints:");
    println!("  POST {}/analyze - Analyze single text or batch", prefix);
    println!("  GET  {}/search  - Search by topic or keyword", prefix);
    println!("  GET  /health       - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, AppState::new(analyzer, settings)).await
}

// =============================================================================
// KEYWORDS COMMAND
// =============================================================================

/// Print the ranked keywords of a text.
pub fn cmd_keywords(text: &str, limit: usize, json_mode: bool) -> Result<(), GleanerError> {
    let ranked = rank_keywords(text, limit);

    if json_mode {
        print_json(&serde_json::json!({ "keywords": ranked }));
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No keywords found");
        return Ok(());
    }
    for (rank, keyword) in ranked.iter().enumerate() {
        println!("{}. {}", rank + 1, keyword);
    }
    Ok(())
}

// =============================================================================
// CONFIDENCE COMMAND
// =============================================================================

/// Print the confidence score of a text.
pub fn cmd_confidence(
    text: &str,
    summarizer_ok: bool,
    json_mode: bool,
) -> Result<(), GleanerError> {
    let confidence = compute_confidence(text, summarizer_ok);

    if json_mode {
        print_json(&serde_json::json!({
            "confidence": confidence,
            "summarizer_ok": summarizer_ok,
        }));
    } else {
        println!("{:.3}", confidence);
    }
    Ok(())
}

// =============================================================================
// ANALYZE COMMAND
// =============================================================================

/// Analyze one text against the configured backends.
pub async fn cmd_analyze(
    settings: Settings,
    text: &str,
    json_mode: bool,
) -> Result<(), GleanerError> {
    let analyzer = build_analyzer(&settings)?;
    let records = analyzer
        .run(&AnalyzeInput::Single(text.to_string()))
        .await?;

    if json_mode {
        print_json(&serde_json::json!({ "results": records }));
        return Ok(());
    }
    for record in &records {
        print_record(record);
    }
    Ok(())
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Search the configured store.
pub async fn cmd_search(
    settings: Settings,
    topic: &str,
    json_mode: bool,
) -> Result<(), GleanerError> {
    let store = AnalysisStore::from_settings(&settings)?;
    let records = store.search(topic).await?;

    if json_mode {
        print_json(&serde_json::json!({ "results": records }));
        return Ok(());
    }

    println!("{} result(s)", records.len());
    for record in &records {
        println!();
        print_record(record);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
