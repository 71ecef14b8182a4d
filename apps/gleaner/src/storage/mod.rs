//! # Storage Backends
//!
//! `AnalysisStore` selects one of two backends at startup:
//!
//! - `InMemory` - the core `MemoryStore`, lost on restart (`USE_INMEM_DB=true`)
//! - `Remote` - a PostgREST table (Supabase), see `remote`
//!
//! Both follow the search contract in `gleaner_core::store`: blank query
//! lists records, otherwise exact case-insensitive topic/keyword match,
//! topic matches before keyword matches, de-duplicated by id.

mod remote;

pub use remote::RemoteStore;

use crate::config::Settings;
use gleaner_core::{AnalysisRecord, GleanerError, MemoryStore, NewAnalysis};

/// Storage backend used by the analysis pipeline.
#[derive(Debug)]
pub enum AnalysisStore {
    /// Process-local store.
    InMemory(MemoryStore),
    /// PostgREST-compatible remote table.
    Remote(RemoteStore),
}

impl AnalysisStore {
    /// An empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::InMemory(MemoryStore::new())
    }

    /// Select the backend named by the settings.
    ///
    /// The remote backend requires `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    pub fn from_settings(settings: &Settings) -> Result<Self, GleanerError> {
        if settings.use_inmem_db {
            return Ok(Self::in_memory());
        }
        RemoteStore::from_settings(settings).map(Self::Remote)
    }

    /// Backend name for logs and CLI output.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "in-memory",
            Self::Remote(_) => "remote",
        }
    }

    /// Store an analysis and return it with its assigned id.
    pub async fn insert(&self, analysis: NewAnalysis) -> Result<AnalysisRecord, GleanerError> {
        match self {
            Self::InMemory(store) => Ok(store.insert(analysis)),
            Self::Remote(store) => store.insert(&analysis).await,
        }
    }

    /// Search by topic or keyword. A blank query lists records.
    pub async fn search(&self, query: &str) -> Result<Vec<AnalysisRecord>, GleanerError> {
        match self {
            Self::InMemory(store) => Ok(store.search(query)),
            Self::Remote(store) => store.search(query).await,
        }
    }
}
