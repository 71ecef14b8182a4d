//! # Analysis Store
//!
//! The in-memory analysis store and the search contract every backend
//! shares.
//!
//! ## Search Contract
//!
//! - A blank query returns every record (backends may bound the count).
//! - Otherwise a record matches when the query equals, case-insensitively,
//!   at least one of its topics or keywords. Substrings never match:
//!   "ai" does not match "air".
//! - Results are de-duplicated by id, first occurrence wins.
//!
//! ## Concurrency
//!
//! `MemoryStore` is shared by every request handler. All access goes through
//! one mutex, so an insert never interleaves with a search.

use crate::{AnalysisRecord, NewAnalysis, RecordId};
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

// =============================================================================
// SEARCH CONTRACT
// =============================================================================

/// Normalize a search query. Returns `None` for a blank query.
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Whether `record` matches an already-normalized query.
#[must_use]
pub fn record_matches(record: &AnalysisRecord, normalized_query: &str) -> bool {
    record
        .topics
        .iter()
        .chain(record.keywords.iter())
        .any(|term| term.to_lowercase() == normalized_query)
}

/// Concatenate result sets, keeping the first occurrence of every id.
#[must_use]
pub fn merge_unique_by_id(
    sets: impl IntoIterator<Item = Vec<AnalysisRecord>>,
) -> Vec<AnalysisRecord> {
    let mut seen: BTreeSet<RecordId> = BTreeSet::new();
    let mut merged = Vec::new();
    for record in sets.into_iter().flatten() {
        if seen.insert(record.id.clone()) {
            merged.push(record);
        }
    }
    merged
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Append-only in-memory store, ordered by insertion.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnalysisRecord>> {
        // Appends are atomic under the lock, so a poisoned guard still holds a consistent list.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store an analysis, assigning a fresh id when none is given.
    pub fn insert(&self, analysis: NewAnalysis) -> AnalysisRecord {
        let id = analysis.id.clone().unwrap_or_else(RecordId::generate);
        let record = analysis.into_record(id);
        self.lock().push(record.clone());
        record
    }

    /// Search by topic or keyword. A blank query returns everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<AnalysisRecord> {
        let records = self.lock();
        match normalize_query(query) {
            None => records.clone(),
            Some(q) => records
                .iter()
                .filter(|r| record_matches(r, &q))
                .cloned()
                .collect(),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
