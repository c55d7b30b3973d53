//! # Repository Module
//!
//! Database repository implementations for Pricescan.
//!
//! ```text
//! Database handle
//!     │
//!     ├── db.products()       ProductRepository  - catalog CRUD + the
//!     │                                            ProductStore capability
//!     ├── db.price_history()  PriceHistoryRepository - recorded prices
//!     └── db.scans()          ScanRepository     - barcode scan log
//! ```
//!
//! Each repository holds a cloned pool handle and is cheap to construct
//! per call.

pub mod history;
pub mod product;
pub mod scan;
