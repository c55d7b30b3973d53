//! # In-Memory Sort Stage
//!
//! Comparator-based ordering for the initials path, where results are
//! already materialized. Must agree with the storage-delegated ORDER BY
//! translation in the database layer:
//!
//! - name/category compare case-insensitively,
//! - price/stock compare as parsed floats (so "10" sorts after "9"),
//! - created/modified compare as timestamps,
//! - ties keep their prior relative order (stable sort).
//!
//! [`SortKey::Relevance`] is deliberately a no-op here: on the initials
//! path the ranker's merge order *is* the requested order.

use std::cmp::Ordering;

use crate::types::{Product, SortKey, SortOrder};

/// Reorders `products` by the requested key and direction.
pub fn sort_products(products: &mut [Product], key: SortKey, order: SortOrder) {
    if key == SortKey::Relevance {
        return;
    }

    products.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Relevance => Ordering::Equal,
        SortKey::Name => case_insensitive(&a.name, &b.name),
        SortKey::Category => case_insensitive(
            a.category.as_deref().unwrap_or(""),
            b.category.as_deref().unwrap_or(""),
        ),
        SortKey::Barcode => a.barcode.cmp(&b.barcode),
        SortKey::Price => numeric(a.price_value(), b.price_value()),
        SortKey::Stock => numeric(
            a.stock_quantity.trim().parse::<f64>().ok(),
            b.stock_quantity.trim().parse::<f64>().ok(),
        ),
        SortKey::Created => a.created_at.cmp(&b.created_at),
        SortKey::Modified => a.updated_at.cmp(&b.updated_at),
    }
}

fn case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Unparseable decimals sort as zero, matching the numeric CAST the
/// storage layer applies to the same fields.
fn numeric(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn product(name: &str, price: &str, stock: &str) -> Product {
        Product {
            id: name.to_string(),
            barcode: name.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            stock_quantity: stock.to_string(),
            category: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_price_sorts_numerically_not_lexicographically() {
        let mut items = vec![
            product("a", "10.00", "1"),
            product("b", "9.00", "1"),
            product("c", "100.00", "1"),
        ];
        sort_products(&mut items, SortKey::Price, SortOrder::Asc);
        assert_eq!(names(&items), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_descending_reverses() {
        let mut items = vec![product("a", "1", "2"), product("b", "1", "30")];
        sort_products(&mut items, SortKey::Stock, SortOrder::Desc);
        assert_eq!(names(&items), vec!["b", "a"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let mut items = vec![
            product("banana", "1", "1"),
            product("Apple", "1", "1"),
            product("cherry", "1", "1"),
        ];
        sort_products(&mut items, SortKey::Name, SortOrder::Asc);
        assert_eq!(names(&items), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_relevance_is_a_no_op() {
        let mut items = vec![product("z", "9", "1"), product("a", "1", "1")];
        sort_products(&mut items, SortKey::Relevance, SortOrder::Asc);
        assert_eq!(names(&items), vec!["z", "a"]);
    }

    #[test]
    fn test_timestamp_sort() {
        let old = Utc::now() - Duration::days(2);
        let mut a = product("older", "1", "1");
        a.created_at = old;
        let b = product("newer", "1", "1");

        let mut items = vec![b, a];
        sort_products(&mut items, SortKey::Created, SortOrder::Asc);
        assert_eq!(names(&items), vec!["older", "newer"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut items = vec![
            product("first", "5.00", "1"),
            product("second", "5.00", "1"),
            product("third", "5.00", "1"),
        ];
        sort_products(&mut items, SortKey::Price, SortOrder::Asc);
        assert_eq!(names(&items), vec!["first", "second", "third"]);
    }
}
