//! # Search Engine
//!
//! Drives a search request through classification, retrieval, ranking,
//! sorting, and pagination.
//!
//! ## Two Retrieval Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  SearchRequest                                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  classify(query)                                                    │
//! │       │                                                             │
//! │       ├── None / SingleTerm / MultiTerm / Numeric                   │
//! │       │        │  storage-delegated path                            │
//! │       │        ▼                                                    │
//! │       │   count(filter) ──► query(filter, ORDER BY, LIMIT/OFFSET)   │
//! │       │                                                             │
//! │       └── InitialsCandidate                                         │
//! │                │  materialize-then-rank path                        │
//! │                ▼                                                    │
//! │           query_all(filter) ──► rank ──► sort ──► slice             │
//! │                                                                     │
//! │  Both produce { products, total } with total counted pre-paging.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The initials path materializes the entire filtered candidate set -
//! acronym ranking cannot be pushed into the storage query, and every
//! candidate must be bucketed before the page window applies. Its cost is
//! linear in the active, category/stock-filtered product count.

use crate::classify::{classify, QueryClass};
use crate::error::SearchResult;
use crate::paginate::slice_page;
use crate::predicate::Predicate;
use crate::rank::rank_by_initials;
use crate::sort::sort_products;
use crate::store::{OrderBy, ProductStore};
use crate::types::{SearchPage, SearchRequest};

/// Stateless, request-scoped search engine over a [`ProductStore`].
///
/// ## Example
/// ```rust,ignore
/// let engine = SearchEngine::new(db.products());
/// let page = engine.search(&SearchRequest::new().query("bcc")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine<S> {
    store: S,
}

impl<S: ProductStore> SearchEngine<S> {
    /// Creates an engine over the given store.
    pub fn new(store: S) -> Self {
        SearchEngine { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Executes a search and returns one page plus the pre-pagination
    /// total.
    pub async fn search(&self, request: &SearchRequest) -> SearchResult<SearchPage> {
        match classify(request.query.as_deref()) {
            QueryClass::InitialsCandidate(term) => self.materialize_and_rank(request, &term).await,
            class => self.delegate_to_store(request, &class).await,
        }
    }

    /// Structural filters shared by both paths: active records only, plus
    /// the category and stock filters when enabled.
    fn base_filter(&self, request: &SearchRequest) -> Vec<Option<Predicate>> {
        vec![
            Some(Predicate::active()),
            Predicate::category_is(request.category_filter()),
            Predicate::stock_in(request.stock),
        ]
    }

    /// Common path: the text predicate joins the structural filters and
    /// counting, ordering, and paging are pushed to the storage layer.
    async fn delegate_to_store(
        &self,
        request: &SearchRequest,
        class: &QueryClass,
    ) -> SearchResult<SearchPage> {
        let mut parts = self.base_filter(request);
        parts.push(Predicate::for_class(class));
        let filter = Predicate::all_of(parts);

        let total = self.store.count(&filter).await?;
        let order = OrderBy {
            key: request.sort_by,
            direction: request.sort_order,
        };
        let products = self
            .store
            .query(&filter, order, request.page.limit, request.page.offset)
            .await?;

        Ok(SearchPage { products, total })
    }

    /// Initials path: fetch every structurally-admitted candidate, bucket
    /// acronym matches ahead of substring matches, then sort and page in
    /// memory. Relevance order preserves the merge order untouched.
    async fn materialize_and_rank(
        &self,
        request: &SearchRequest,
        term: &str,
    ) -> SearchResult<SearchPage> {
        let filter = Predicate::all_of(self.base_filter(request));
        let candidates = self.store.query_all(&filter).await?;

        let mut ranked = rank_by_initials(candidates, term);
        sort_products(&mut ranked, request.sort_by, request.sort_order);

        let total = ranked.len() as u64;
        let products = slice_page(ranked, &request.page);

        Ok(SearchPage { products, total })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
