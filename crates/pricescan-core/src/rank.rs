//! # Result Ranker / Merger
//!
//! Ranking for the initials retrieval path. Candidates are partitioned
//! into acronym matches and plain substring matches, then concatenated
//! initials-first:
//!
//! ```text
//! candidates ──► initials match?  ──yes──► bucket A (retrieval order)
//!                     │no
//!                     ▼
//!                substring hit on   ──yes──► bucket B (retrieval order)
//!                name/barcode/category
//!                     │no
//!                     ▼
//!                 discarded
//!
//! ranked = A ++ B
//! ```
//!
//! The concatenation is the relevance signal: an acronym match always
//! outranks an incidental substring match unless the caller later asks
//! for a different sort key.

use crate::initials::matches_initials;
use crate::types::Product;

/// Ranks a materialized candidate set against an initials-candidate term.
///
/// `term` is expected trimmed and lower-cased (as produced by the
/// classifier). Candidates matching neither interpretation are dropped.
pub fn rank_by_initials(candidates: Vec<Product>, term: &str) -> Vec<Product> {
    let mut initials_matches = Vec::new();
    let mut substring_matches = Vec::new();

    for candidate in candidates {
        if matches_initials(term, &candidate.name) {
            initials_matches.push(candidate);
        } else if contains_term(&candidate, term) {
            substring_matches.push(candidate);
        }
    }

    initials_matches.extend(substring_matches);
    initials_matches
}

/// Case-insensitive containment of the term in name, barcode, or category.
fn contains_term(product: &Product, term: &str) -> bool {
    product.name.to_lowercase().contains(term)
        || product.barcode.to_lowercase().contains(term)
        || product
            .category
            .as_deref()
            .map(|c| c.to_lowercase().contains(term))
            .unwrap_or(false)
}

// =============================================================================
// Unit Tests
// =============================================================================
