//! # gleaner-core
//!
//! The deterministic heuristics for Gleaner - THE LOGIC.
//!
//! This crate turns free-form text into the parts of an analysis that do not
//! need a language model, and defines how analyses are stored and searched:
//! - `keywords`: up to three ranked noun-like keywords
//! - `confidence`: a bounded reliability score
//! - `metadata`: normalization of summarizer metadata
//! - `store`: the in-memory store and the shared search contract
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Every function is deterministic except record id generation
//! - The only shared mutable state is the `MemoryStore`, guarded by a mutex

// =============================================================================
// MODULES
// =============================================================================

pub mod confidence;
pub mod input;
pub mod keywords;
pub mod lexicon;
pub mod metadata;
pub mod primitives;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{AnalysisRecord, GleanerError, NewAnalysis, RecordId, Sentiment};

// =============================================================================
// RE-EXPORTS: Heuristics
// =============================================================================

pub use confidence::compute_confidence;
pub use input::{validate_batch, validate_text};
pub use keywords::{ScoredKeyword, extract_keywords, rank_keywords};
pub use metadata::{AnalysisMetadata, parse_model_metadata};

// =============================================================================
// RE-EXPORTS: Storage
// =============================================================================

pub use store::{MemoryStore, merge_unique_by_id, normalize_query, record_matches};
