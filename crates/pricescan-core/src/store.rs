//! # Storage Capability
//!
//! The query-executor interface the search engine consumes. The engine
//! depends only on this trait; `pricescan-db` provides the SQLite
//! implementation, and tests provide an in-memory one.
//!
//! ```text
//! SearchEngine ──► ProductStore ──┬──► ProductRepository (SQLite, sqlx)
//!                                 └──► MemoryStore        (tests)
//! ```

use crate::error::SearchResult;
use crate::predicate::Predicate;
use crate::types::{Product, SortKey, SortOrder};

/// Ordering instruction pushed down to the storage query.
///
/// `SortKey::Relevance` (or an absent caller preference) translates to the
/// default ordering, name ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub key: SortKey,
    pub direction: SortOrder,
}

impl Default for OrderBy {
    fn default() -> Self {
        OrderBy {
            key: SortKey::Relevance,
            direction: SortOrder::Asc,
        }
    }
}

/// Read-only product retrieval capability.
///
/// Implementations compile the [`Predicate`] to their native query
/// language. All three operations see only records the predicate admits;
/// failures surface as [`SearchError::Retrieval`](crate::SearchError).
#[allow(async_fn_in_trait)]
pub trait ProductStore {
    /// Counts records satisfying the predicate.
    async fn count(&self, filter: &Predicate) -> SearchResult<u64>;

    /// Fetches one ordered page of records. `limit: None` means no LIMIT
    /// clause at all.
    async fn query(
        &self,
        filter: &Predicate,
        order: OrderBy,
        limit: Option<u32>,
        offset: u32,
    ) -> SearchResult<Vec<Product>>;

    /// Fetches the entire matching set in the store's stable retrieval
    /// order. Used only by the initials path, which must rank every
    /// candidate before paging.
    async fn query_all(&self, filter: &Predicate) -> SearchResult<Vec<Product>>;
}
