//! # Configuration
//!
//! Application settings, layered as:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config` / `GLEANER_CONFIG`)
//! 3. `.env` file and process environment (highest priority)
//!
//! ## Environment Variables
//!
//! - `GLEANER_APP_NAME`, `GLEANER_API_PREFIX`, `GLEANER_ENV`
//! - `GOOGLE_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`
//! - `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `SUPABASE_TABLE`
//! - `USE_MOCK_LLM`, `USE_INMEM_DB` (true only for "true", any case)
//! - `GLEANER_HTTP_TIMEOUT_SECS` (outbound summarizer and storage calls)
//!
//! Server security knobs (`GLEANER_CORS_ORIGINS`, `GLEANER_RATE_LIMIT`,
//! `GLEANER_API_KEY`) are read by the HTTP layer directly.

use gleaner_core::GleanerError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default deadline for one outbound HTTP call, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub api_prefix: String,
    pub env: String,
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub supabase_table: String,
    pub use_mock_llm: bool,
    pub use_inmem_db: bool,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "LLM Knowledge Extractor".to_string(),
            api_prefix: "/api".to_string(),
            env: "dev".to_string(),
            google_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            supabase_table: "analyses".to_string(),
            use_mock_llm: false,
            use_inmem_db: false,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Settings {
    /// Settings suitable for tests: mock summarizer, in-memory store.
    #[must_use]
    pub fn local() -> Self {
        Self {
            use_mock_llm: true,
            use_inmem_db: true,
            ..Self::default()
        }
    }

    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, GleanerError> {
        toml::from_str(text).map_err(|e| GleanerError::Config(format!("Invalid TOML: {}", e)))
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, GleanerError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GleanerError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Override fields from a key lookup (normally the process environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("GLEANER_APP_NAME").and_then(non_empty) {
            self.app_name = v;
        }
        if let Some(v) = lookup("GLEANER_API_PREFIX") {
            self.api_prefix = v;
        }
        if let Some(v) = lookup("GLEANER_ENV").and_then(non_empty) {
            self.env = v;
        }
        if let Some(v) = lookup("GOOGLE_API_KEY").and_then(non_empty) {
            self.google_api_key = Some(v);
        }
        if let Some(v) = lookup("GEMINI_MODEL").and_then(non_empty) {
            self.gemini_model = v;
        }
        if let Some(v) = lookup("GEMINI_BASE_URL").and_then(non_empty) {
            self.gemini_base_url = v;
        }
        if let Some(v) = lookup("SUPABASE_URL").and_then(non_empty) {
            self.supabase_url = Some(v);
        }
        if let Some(v) = lookup("SUPABASE_ANON_KEY").and_then(non_empty) {
            self.supabase_anon_key = Some(v);
        }
        if let Some(v) = lookup("SUPABASE_TABLE").and_then(non_empty) {
            self.supabase_table = v;
        }
        if let Some(v) = lookup("USE_MOCK_LLM") {
            self.use_mock_llm = parse_flag(&v);
        }
        if let Some(v) = lookup("USE_INMEM_DB") {
            self.use_inmem_db = parse_flag(&v);
        }
        if let Some(v) = lookup("GLEANER_HTTP_TIMEOUT_SECS").and_then(non_empty) {
            match v.trim().parse() {
                Ok(secs) => self.http_timeout_secs = secs,
                Err(_) => tracing::warn!(
                    "Ignoring invalid GLEANER_HTTP_TIMEOUT_SECS '{}', keeping {}s",
                    v,
                    self.http_timeout_secs
                ),
            }
        }
    }

    /// Deadline for one outbound summarizer or storage call.
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Check invariants that do not depend on external services.
    pub fn validate(&self) -> Result<(), GleanerError> {
        let prefix = self.api_prefix.as_str();
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(GleanerError::Config(format!(
                "api_prefix '{}' must start with '/' and must not end with '/'",
                prefix
            )));
        }
        if self.http_timeout_secs == 0 {
            return Err(GleanerError::Config(
                "http_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.supabase_table.trim().is_empty() {
            return Err(GleanerError::Config(
                "supabase_table must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load settings from defaults, an optional file, `.env`, and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, GleanerError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }

        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }
}

// =============================================================================
// TESTS
// =============================================================================
