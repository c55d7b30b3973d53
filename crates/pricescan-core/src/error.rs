//! # Error Types
//!
//! Search-side error types.
//!
//! Storage failures are not retried here; they surface as a generic
//! retrieval failure for the transport layer to translate. Empty result
//! sets, unknown sort keys, and malformed pagination are *not* errors -
//! they normalize to defaults (see the request types).

use thiserror::Error;

/// Errors surfaced by the search engine.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The storage collaborator failed; no partial results are returned.
    #[error("product retrieval failed: {0}")]
    Retrieval(String),
}

impl SearchError {
    /// Wraps a storage-layer failure.
    pub fn retrieval(source: impl std::fmt::Display) -> Self {
        SearchError::Retrieval(source.to_string())
    }
}

/// Convenience type alias for Results with SearchError.
pub type SearchResult<T> = Result<T, SearchError>;

// =============================================================================
// Unit Tests
// =============================================================================
