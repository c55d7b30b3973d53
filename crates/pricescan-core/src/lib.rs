//! # pricescan-core: Pure Search Logic for Pricescan
//!
//! This crate is the **heart** of Pricescan's catalog search. It contains
//! the product search-and-ranking engine as pure logic with zero I/O
//! dependencies.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Pricescan Search Pipeline                       │
//! │                                                                     │
//! │  raw query + filters                                                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────┐   ┌────────────┐   ┌───────────┐   ┌───────────┐    │
//! │  │ classify  │──►│ predicate  │──►│ Product   │──►│ rank      │    │
//! │  │           │   │ (AST)      │   │ Store     │   │ (initials)│    │
//! │  └───────────┘   └────────────┘   └───────────┘   └─────┬─────┘    │
//! │                                                         │          │
//! │                                   ┌───────────┐   ┌─────▼─────┐    │
//! │                                   │ paginate  │◄──│ sort      │    │
//! │                                   └─────┬─────┘   └───────────┘    │
//! │                                         ▼                          │
//! │                                 { products, total }                │
//! │                                                                     │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SearchRequest, SearchPage, ...)
//! - [`classify`] - Query classification (numeric, initials, substring)
//! - [`predicate`] - Composable filter AST shared by SQL and memory paths
//! - [`initials`] - Acronym-style initials matching
//! - [`rank`] - Initials-first result merging
//! - [`sort`] - In-memory sort stage
//! - [`paginate`] - Page slicing
//! - [`store`] - The consumed storage capability (`ProductStore`)
//! - [`engine`] - The `SearchEngine` driving both retrieval strategies
//! - [`error`] - Search error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classify;
pub mod engine;
pub mod error;
pub mod initials;
pub mod paginate;
pub mod predicate;
pub mod rank;
pub mod sort;
pub mod store;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use classify::{classify, QueryClass};
pub use engine::SearchEngine;
pub use error::{SearchError, SearchResult};
pub use predicate::{Field, IntRange, Literal, Predicate};
pub use store::{OrderBy, ProductStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size when the request carries no usable limit.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Stock quantities below this (and above zero) count as "low stock";
/// at or above it counts as "in stock".
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Category filter sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All Categories";
