//! # Paginator
//!
//! In-memory page slicing for the initials path. The storage path pushes
//! LIMIT/OFFSET into the query instead; both honor the same window
//! semantics, including the "return all" limit sentinel.

use crate::types::{Pagination, Product};

/// Slices the ordered candidate sequence to the requested window.
///
/// An offset beyond the end yields an empty page, not an error. A `None`
/// limit bypasses slicing after the offset entirely.
pub fn slice_page(ordered: Vec<Product>, page: &Pagination) -> Vec<Product> {
    let skipped = ordered.into_iter().skip(page.offset as usize);
    match page.limit {
        Some(limit) => skipped.take(limit as usize).collect(),
        None => skipped.collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
