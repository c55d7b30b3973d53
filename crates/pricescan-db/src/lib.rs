//! # pricescan-db: Database Layer for Pricescan
//!
//! SQLite storage for the Pricescan catalog, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Pricescan Data Flow                            │
//! │                                                                     │
//! │  Caller (HTTP layer / desktop shell)                                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  pricescan_core::SearchEngine                                       │
//! │       │  ProductStore trait                                         │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  pricescan-db (THIS CRATE)                  │   │
//! │  │                                                             │   │
//! │  │   ┌───────────┐   ┌──────────────┐   ┌──────────────┐      │   │
//! │  │   │ Database  │   │ Repositories │   │  Migrations  │      │   │
//! │  │   │ (pool.rs) │◄──│ product,     │   │  (embedded)  │      │   │
//! │  │   │           │   │ history,scan │   │              │      │   │
//! │  │   └───────────┘   └──────────────┘   └──────────────┘      │   │
//! │  │          ▲                                                  │   │
//! │  │          └── sql.rs: predicate AST → bound WHERE / ORDER BY │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode)                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and the `Database` handle
//! - [`migrations`] - Embedded database migrations
//! - [`sql`] - Predicate and sort compilation
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, history, scan)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

mod sql;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::history::PriceHistoryRepository;
pub use repository::product::{generate_product_id, ProductRepository};
pub use repository::scan::ScanRepository;
