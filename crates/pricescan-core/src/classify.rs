//! # Query Classifier
//!
//! Decides which matching strategy applies to a raw search string.
//!
//! ## Classification Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  raw query                                                          │
//! │      │  trim, lowercase, split on whitespace                        │
//! │      ▼                                                              │
//! │  no terms        → None              (no text filtering)           │
//! │  2+ terms        → MultiTerm         (AND of substring matches)    │
//! │  1 term, \d+(\.\d+)?                                                │
//! │                  → Numeric           (substring OR exact price)    │
//! │  1 term, [a-zA-Z]{2,6}                                              │
//! │                  → InitialsCandidate (acronym ranking path)        │
//! │  1 term, other   → SingleTerm        (substring match)             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The initials rule is a heuristic: a short all-letter token is treated as
//! a possible acronym, and resolution is deferred to the ranking stage,
//! which combines both the acronym and the plain-substring interpretation.
//! Legitimate short plain-text queries (a 3-letter product code, say) take
//! the acronym path too; do not tighten the 2-6 window without product
//! sign-off.

use serde::{Deserialize, Serialize};

/// The matching strategy selected for a search query.
///
/// Terms are carried trimmed and lower-cased, ready for case-insensitive
/// containment tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryClass {
    /// Absent or blank query: no text predicate at all.
    None,

    /// Two or more whitespace-separated terms, AND-combined.
    MultiTerm(Vec<String>),

    /// A single pure-number term: substring hit on name/barcode/category
    /// OR exact numeric equality on price.
    Numeric { term: String, value: f64 },

    /// A single 2-6 letter alphabetic term, possibly an acronym.
    InitialsCandidate(String),

    /// Any other single term: plain case-insensitive substring match.
    SingleTerm(String),
}

/// Classifies a raw query string. Pure; any input is classifiable.
pub fn classify(raw: Option<&str>) -> QueryClass {
    let trimmed = match raw {
        Some(q) => q.trim().to_lowercase(),
        None => return QueryClass::None,
    };

    if trimmed.is_empty() {
        return QueryClass::None;
    }

    let mut terms: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();

    if terms.len() > 1 {
        return QueryClass::MultiTerm(terms);
    }

    let term = match terms.pop() {
        Some(term) => term,
        None => return QueryClass::None,
    };

    if is_numeric_term(&term) {
        // The pattern guarantees a parseable f64.
        let value = term.parse::<f64>().unwrap_or(0.0);
        return QueryClass::Numeric { term, value };
    }

    if is_initials_term(&term) {
        return QueryClass::InitialsCandidate(term);
    }

    QueryClass::SingleTerm(term)
}

/// `^\d+(\.\d+)?$` - a pure integer or decimal literal.
fn is_numeric_term(term: &str) -> bool {
    let mut parts = term.splitn(2, '.');

    let integer = parts.next().unwrap_or("");
    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match parts.next() {
        None => true,
        Some(fraction) => {
            !fraction.is_empty() && fraction.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

/// `^[a-zA-Z]{2,6}$` - short all-letter token, the acronym heuristic.
fn is_initials_term(term: &str) -> bool {
    (2..=6).contains(&term.len()) && term.bytes().all(|b| b.is_ascii_alphabetic())
}

// =============================================================================
// Unit Tests
// =============================================================================
