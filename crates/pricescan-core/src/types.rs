//! # Domain Types
//!
//! Core domain types used throughout Pricescan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌──────────────────┐   ┌─────────────────┐   │
//! │  │    Product     │   │  SearchRequest   │   │   SearchPage    │   │
//! │  │  ────────────  │   │  ──────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)     │   │  query           │   │  products       │   │
//! │  │  barcode       │   │  category        │   │  total          │   │
//! │  │  name          │   │  stock filter    │   └─────────────────┘   │
//! │  │  price (text)  │   │  page window     │                         │
//! │  │  stock (text)  │   │  sort key/order  │                         │
//! │  └────────────────┘   └──────────────────┘                         │
//! │                                                                     │
//! │  Closed enums: StockFilter, SortKey, SortOrder                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decimal-as-String Fields
//! `price` and `stock_quantity` are stored as decimal strings, matching the
//! catalog's import format. Comparisons go through the numeric coercion
//! helpers on [`Product`]; the storage layer applies the equivalent casts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ALL_CATEGORIES, DEFAULT_PAGE_SIZE, LOW_STOCK_THRESHOLD};

// =============================================================================
// Product
// =============================================================================

/// A catalog product, resolved by barcode scans and returned by searches.
///
/// The search engine treats products as read-only: it queries and ranks,
/// never creates or mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Barcode (EAN-13, UPC-A, etc.) - unique business key.
    pub barcode: String,

    /// Display name shown in the scanner and catalog browser.
    pub name: String,

    /// Sale price as a decimal string (e.g. "500.00").
    pub price: String,

    /// Stock on hand as a decimal string, coerced to integer for comparisons.
    pub stock_quantity: String,

    /// Product category, if assigned.
    pub category: Option<String>,

    /// Whether the product is eligible for display and search.
    pub is_active: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the sale price as a number, or `None` if the stored
    /// decimal string is unparseable.
    pub fn price_value(&self) -> Option<f64> {
        self.price.trim().parse::<f64>().ok()
    }

    /// Returns the stock quantity coerced to a whole number of units.
    ///
    /// Fractional quantities truncate toward zero; unparseable values
    /// count as zero stock.
    pub fn stock_units(&self) -> i64 {
        self.stock_quantity
            .trim()
            .parse::<f64>()
            .map(|q| q as i64)
            .unwrap_or(0)
    }
}

// =============================================================================
// Stock Filter
// =============================================================================

/// Stock-level filter applied to search results.
///
/// Levels are defined over the integer-coerced stock quantity:
/// out-of-stock is exactly zero, low-stock is below
/// [`LOW_STOCK_THRESHOLD`], in-stock is at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockFilter {
    /// Quantity == 0.
    OutOfStock,
    /// 0 < quantity < 10.
    LowStock,
    /// Quantity >= 10.
    InStock,
    /// No stock filtering.
    All,
}

impl StockFilter {
    /// Parses a raw filter parameter.
    ///
    /// Absent or unrecognized values disable the filter rather than
    /// raising an error.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("out-of-stock") | Some("out_of_stock") => StockFilter::OutOfStock,
            Some("low-stock") | Some("low_stock") => StockFilter::LowStock,
            Some("in-stock") | Some("in_stock") => StockFilter::InStock,
            _ => StockFilter::All,
        }
    }

    /// Tests a stock quantity (in whole units) against this filter.
    pub fn admits(&self, units: i64) -> bool {
        match self {
            StockFilter::OutOfStock => units == 0,
            StockFilter::LowStock => units > 0 && units < LOW_STOCK_THRESHOLD,
            StockFilter::InStock => units >= LOW_STOCK_THRESHOLD,
            StockFilter::All => true,
        }
    }
}

impl Default for StockFilter {
    fn default() -> Self {
        StockFilter::All
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort key for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ranker order on the initials path, name order otherwise.
    Relevance,
    Name,
    Price,
    Stock,
    Category,
    Barcode,
    Created,
    Modified,
}

impl SortKey {
    /// Parses a raw sort parameter.
    ///
    /// An absent key means relevance order. An unrecognized key silently
    /// falls back to name order - lenient by policy, not an error.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("relevance") => SortKey::Relevance,
            Some("name") => SortKey::Name,
            Some("price") => SortKey::Price,
            Some("stock") => SortKey::Stock,
            Some("category") => SortKey::Category,
            Some("barcode") => SortKey::Barcode,
            Some("created") => SortKey::Created,
            Some("modified") => SortKey::Modified,
            Some(_) => SortKey::Name,
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Relevance
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses a raw direction parameter. Anything other than "desc" is
    /// ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination window for a search.
///
/// `limit: None` is the "return all" sentinel: no LIMIT clause on the
/// storage path, no slicing on the in-memory path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Pagination {
    /// Builds a window from raw request parameters.
    ///
    /// Malformed or missing values normalize to the defaults (limit 10,
    /// offset 0) - absence of a valid value is a request for the default
    /// page, not an error. A zero limit also falls back to the default.
    /// The literal `"all"` selects the unbounded sentinel.
    pub fn from_params(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = match limit.map(str::trim) {
            Some("all") => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) | Err(_) => Some(DEFAULT_PAGE_SIZE),
                Ok(n) => Some(n),
            },
            None => Some(DEFAULT_PAGE_SIZE),
        };

        let offset = offset
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(0);

        Pagination { limit, offset }
    }

    /// The unbounded window: every matching record, no offset.
    pub fn all() -> Self {
        Pagination {
            limit: None,
            offset: 0,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            limit: Some(DEFAULT_PAGE_SIZE),
            offset: 0,
        }
    }
}

// =============================================================================
// Search Request / Result
// =============================================================================

/// A fully-normalized search request.
///
/// ## Example
/// ```rust
/// use pricescan_core::{SearchRequest, SortKey, SortOrder};
///
/// let request = SearchRequest::new()
///     .query("bcc")
///     .category("Beverages")
///     .sort(SortKey::Price, SortOrder::Desc);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query; `None` or blank means no text filtering.
    pub query: Option<String>,

    /// Category filter; `None` or the "All Categories" sentinel disables it.
    pub category: Option<String>,

    /// Stock-level filter.
    pub stock: StockFilter,

    /// Pagination window.
    pub page: Pagination,

    /// Requested sort key.
    pub sort_by: SortKey,

    /// Requested sort direction.
    pub sort_order: SortOrder,
}

impl SearchRequest {
    /// Creates a request with all defaults: no filters, first page of 10,
    /// relevance order.
    pub fn new() -> Self {
        SearchRequest::default()
    }

    /// Builds a request from raw (string-typed) transport parameters,
    /// applying the normalization rules: bad numerics become defaults,
    /// unknown enum values fall back leniently.
    pub fn from_params(
        query: Option<&str>,
        category: Option<&str>,
        stock: Option<&str>,
        limit: Option<&str>,
        offset: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        SearchRequest {
            query: query.map(str::to_string),
            category: category.map(str::to_string),
            stock: StockFilter::from_param(stock),
            page: Pagination::from_params(limit, offset),
            sort_by: SortKey::from_param(sort_by),
            sort_order: SortOrder::from_param(sort_order),
        }
    }

    /// Sets the free-text query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the category filter.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the stock-level filter.
    pub fn stock(mut self, stock: StockFilter) -> Self {
        self.stock = stock;
        self
    }

    /// Sets the pagination window.
    pub fn page(mut self, limit: Option<u32>, offset: u32) -> Self {
        self.page = Pagination { limit, offset };
        self
    }

    /// Sets sort key and direction.
    pub fn sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }

    /// Returns the effective category filter, with the "All Categories"
    /// sentinel already resolved to `None`.
    pub fn category_filter(&self) -> Option<&str> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
            Some(c) => Some(c),
        }
    }
}

/// One page of search results.
///
/// `total` counts the full filtered+matched set before pagination,
/// never the page size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub products: Vec<Product>,
    pub total: u64,
}

impl SearchPage {
    /// The canonical empty outcome: no matches is a success, not an error.
    pub fn empty() -> Self {
        SearchPage {
            products: Vec::new(),
            total: 0,
        }
    }
}

// =============================================================================
// Stored Collaborator Records
// =============================================================================

/// A recorded purchase price for a product, kept for price analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PriceHistoryEntry {
    pub id: String,
    pub product_id: String,
    /// Price at time of recording, decimal string.
    pub price: String,
    pub quantity: i64,
    pub recorded_at: DateTime<Utc>,
}

/// A single barcode-scan event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ScanEvent {
    pub id: String,
    pub product_id: String,
    pub scanned_at: DateTime<Utc>,
}

/// Price analytics for a single product.
///
/// When no history exists the min/max/avg fall back to the product's
/// current price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAnalytics {
    pub product: Product,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub scan_count: u64,
}

/// Catalog-wide counters for the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_products: u64,
    pub scans_today: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================
