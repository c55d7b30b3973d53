//! # Predicate AST
//!
//! A small tagged-variant expression tree describing which products a
//! search admits. The classifier and filter parameters compose predicates
//! here; the storage layer compiles them to SQL, and [`Predicate::matches`]
//! evaluates them directly over in-memory records.
//!
//! Keeping both consumers on one AST keeps the classifier decoupled from
//! any query syntax, and lets the engine's two retrieval strategies agree
//! on filter semantics.

use serde::{Deserialize, Serialize};

use crate::classify::QueryClass;
use crate::types::{Product, StockFilter};
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// AST
// =============================================================================

/// A product field referenced by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Barcode,
    Name,
    Category,
    Price,
    Stock,
    Active,
}

/// A literal operand for equality tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Text(String),
    Number(f64),
    Flag(bool),
}

/// An inclusive integer range; open ends are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl IntRange {
    /// Tests a value against the range.
    pub fn contains(&self, value: i64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// A filter condition over product records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Field equals a literal. Numeric equality on `Price` compares the
    /// coerced decimal value, not the stored text.
    Eq(Field, Literal),

    /// Case-insensitive containment of the pattern in a text field.
    /// A `None` category never contains anything.
    Like(Field, String),

    /// Integer-coerced field value within an inclusive range.
    Range(Field, IntRange),

    /// Every child holds. An empty conjunction holds trivially.
    And(Vec<Predicate>),

    /// At least one child holds. An empty disjunction never holds.
    Or(Vec<Predicate>),
}

// =============================================================================
// Builders
// =============================================================================

impl Predicate {
    /// Restricts to active records - ANDed into every search.
    pub fn active() -> Predicate {
        Predicate::Eq(Field::Active, Literal::Flag(true))
    }

    /// Case-insensitive substring hit on any of name, barcode, category.
    pub fn text_match(term: &str) -> Predicate {
        Predicate::Or(vec![
            Predicate::Like(Field::Name, term.to_string()),
            Predicate::Like(Field::Barcode, term.to_string()),
            Predicate::Like(Field::Category, term.to_string()),
        ])
    }

    /// Text predicate for a classified query, if the classification calls
    /// for one.
    ///
    /// Initials candidates return `None`: on that path the text
    /// interpretation is resolved by the ranker over the materialized
    /// candidate set, not by the retrieval query.
    pub fn for_class(class: &QueryClass) -> Option<Predicate> {
        match class {
            QueryClass::None | QueryClass::InitialsCandidate(_) => None,
            QueryClass::SingleTerm(term) => Some(Predicate::text_match(term)),
            QueryClass::MultiTerm(terms) => Some(Predicate::And(
                terms.iter().map(|t| Predicate::text_match(t)).collect(),
            )),
            QueryClass::Numeric { term, value } => {
                let mut alternatives = match Predicate::text_match(term) {
                    Predicate::Or(alternatives) => alternatives,
                    other => vec![other],
                };
                alternatives.push(Predicate::Eq(Field::Price, Literal::Number(*value)));
                Some(Predicate::Or(alternatives))
            }
        }
    }

    /// Exact category match; `None` means the filter is disabled.
    pub fn category_is(category: Option<&str>) -> Option<Predicate> {
        category.map(|c| Predicate::Eq(Field::Category, Literal::Text(c.to_string())))
    }

    /// Stock-level filter over the integer-coerced quantity.
    pub fn stock_in(filter: StockFilter) -> Option<Predicate> {
        let range = match filter {
            StockFilter::All => return None,
            StockFilter::OutOfStock => IntRange {
                min: Some(0),
                max: Some(0),
            },
            StockFilter::LowStock => IntRange {
                min: Some(1),
                max: Some(LOW_STOCK_THRESHOLD - 1),
            },
            StockFilter::InStock => IntRange {
                min: Some(LOW_STOCK_THRESHOLD),
                max: None,
            },
        };
        Some(Predicate::Range(Field::Stock, range))
    }

    /// ANDs the present parts into one predicate.
    pub fn all_of(parts: Vec<Option<Predicate>>) -> Predicate {
        Predicate::And(parts.into_iter().flatten().collect())
    }
}

// =============================================================================
// In-Memory Evaluation
// =============================================================================

impl Predicate {
    /// Evaluates the predicate against a product record.
    ///
    /// Mirrors the SQL compilation in the storage layer: text comparisons
    /// are case-insensitive, price equality compares parsed decimals, and
    /// stock ranges see the integer-coerced quantity.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Predicate::Eq(Field::Active, Literal::Flag(active)) => product.is_active == *active,
            Predicate::Eq(Field::Category, Literal::Text(category)) => {
                product.category.as_deref() == Some(category.as_str())
            }
            Predicate::Eq(Field::Price, Literal::Number(value)) => {
                product.price_value() == Some(*value)
            }
            Predicate::Eq(Field::Barcode, Literal::Text(barcode)) => product.barcode == *barcode,
            Predicate::Eq(Field::Name, Literal::Text(name)) => product.name == *name,
            // Remaining field/literal pairings are unconstructable via the
            // builders and admit nothing.
            Predicate::Eq(_, _) => false,

            Predicate::Like(field, pattern) => {
                let needle = pattern.to_lowercase();
                match field {
                    Field::Name => product.name.to_lowercase().contains(&needle),
                    Field::Barcode => product.barcode.to_lowercase().contains(&needle),
                    Field::Category => product
                        .category
                        .as_deref()
                        .map(|c| c.to_lowercase().contains(&needle))
                        .unwrap_or(false),
                    _ => false,
                }
            }

            Predicate::Range(Field::Stock, range) => range.contains(product.stock_units()),
            Predicate::Range(_, _) => false,

            Predicate::And(children) => children.iter().all(|c| c.matches(product)),
            Predicate::Or(children) => children.iter().any(|c| c.matches(product)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use chrono::Utc;

    fn product(name: &str, barcode: &str, price: &str, stock: &str, category: Option<&str>) -> Product {
        Product {
            id: "p".to_string(),
            barcode: barcode.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            stock_quantity: stock.to_string(),
            category: category.map(str::to_string),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_active_predicate_excludes_inactive() {
        let mut p = product("Cola", "123", "1.00", "5", None);
        assert!(Predicate::active().matches(&p));
        p.is_active = false;
        assert!(!Predicate::active().matches(&p));
    }

    #[test]
    fn test_text_match_covers_all_three_fields() {
        let p = product("Boss Classic Cola", "8400123", "1.00", "5", Some("Beverages"));
        assert!(Predicate::text_match("classic").matches(&p));
        assert!(Predicate::text_match("8400").matches(&p));
        assert!(Predicate::text_match("bever").matches(&p));
        assert!(!Predicate::text_match("chocolate").matches(&p));
    }

    #[test]
    fn test_like_on_missing_category_never_matches() {
        let p = product("Cola", "123", "1.00", "5", None);
        assert!(!Predicate::Like(Field::Category, "cola".to_string()).matches(&p));
    }

    #[test]
    fn test_numeric_class_matches_price_or_text() {
        let class = classify(Some("500"));
        let pred = Predicate::for_class(&class).unwrap();

        // Exact price equality, no textual occurrence of "500".
        let priced = product("Olive Oil", "843", "500.00", "3", Some("Food"));
        assert!(pred.matches(&priced));

        // Substring hit on the barcode, price is different.
        let coded = product("Soap", "8450012", "2.50", "3", None);
        assert!(pred.matches(&coded));

        // Neither: no match.
        let other = product("Soap", "12", "2.50", "3", None);
        assert!(!pred.matches(&other));
    }

    #[test]
    fn test_multi_term_requires_every_term() {
        let class = classify(Some("boss cola"));
        let pred = Predicate::for_class(&class).unwrap();

        assert!(pred.matches(&product("Boss Classic Cola", "1", "1", "1", None)));
        assert!(!pred.matches(&product("Boss Classic", "1", "1", "1", None)));
    }

    #[test]
    fn test_initials_class_builds_no_text_predicate() {
        assert_eq!(Predicate::for_class(&classify(Some("bcc"))), None);
        assert_eq!(Predicate::for_class(&classify(None)), None);
    }

    #[test]
    fn test_stock_ranges_match_filter_semantics() {
        let quantities = ["0", "5", "9", "10", "15"];
        let low = Predicate::stock_in(StockFilter::LowStock).unwrap();
        let admitted: Vec<&str> = quantities
            .iter()
            .filter(|q| low.matches(&product("P", "1", "1", q, None)))
            .copied()
            .collect();
        assert_eq!(admitted, vec!["5", "9"]);

        let out = Predicate::stock_in(StockFilter::OutOfStock).unwrap();
        assert!(out.matches(&product("P", "1", "1", "0", None)));
        assert!(!out.matches(&product("P", "1", "1", "1", None)));

        assert_eq!(Predicate::stock_in(StockFilter::All), None);
    }

    #[test]
    fn test_all_of_skips_disabled_filters() {
        let combined = Predicate::all_of(vec![
            Some(Predicate::active()),
            None,
            Predicate::stock_in(StockFilter::InStock),
        ]);
        match combined {
            Predicate::And(children) => assert_eq!(children.len(), 2),
            other => panic!("expected And, got {other:?}"),
        }
    }
}
