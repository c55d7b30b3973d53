//! # Predicate / Sort Compilation
//!
//! Compiles the search core's predicate AST and ordering instructions to
//! parameterized SQLite fragments.
//!
//! ## Compilation Rules
//! ```text
//! Eq(Category, Text)   →  category = ?
//! Eq(Active, Flag)     →  is_active = ?
//! Eq(Price, Number)    →  CAST(price AS REAL) = ?
//! Like(f, pattern)     →  LOWER(f) LIKE ? ESCAPE '\'     (pattern %…%)
//! Range(Stock, a..=b)  →  CAST(stock_quantity AS INTEGER) >= ? AND <= ?
//! And([..]) / Or([..]) →  parenthesized joins
//! ```
//!
//! Every user-supplied value travels through a bind parameter; `%` and `_`
//! in LIKE patterns are escaped. Numeric columns are CAST before
//! comparison so "10" orders after "9", matching the in-memory evaluator
//! in pricescan-core.

use sqlx::{QueryBuilder, Sqlite};

use pricescan_core::{Field, Literal, OrderBy, Predicate, SortKey, SortOrder};

/// Column list matching the field order of `pricescan_core::Product`.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, barcode, name, price, stock_quantity, category, is_active, created_at, updated_at";

fn column(field: Field) -> &'static str {
    match field {
        Field::Barcode => "barcode",
        Field::Name => "name",
        Field::Category => "category",
        Field::Price => "price",
        Field::Stock => "stock_quantity",
        Field::Active => "is_active",
    }
}

/// Appends the WHERE-clause body for a predicate, binding all values.
pub(crate) fn push_predicate(qb: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::Eq(field, Literal::Text(value)) => {
            qb.push(column(*field)).push(" = ").push_bind(value.clone());
        }
        Predicate::Eq(field, Literal::Flag(value)) => {
            qb.push(column(*field)).push(" = ").push_bind(*value);
        }
        Predicate::Eq(field, Literal::Number(value)) => {
            qb.push("CAST(")
                .push(column(*field))
                .push(" AS REAL) = ")
                .push_bind(*value);
        }

        Predicate::Like(field, pattern) => {
            let pattern = format!("%{}%", escape_like(&pattern.to_lowercase()));
            qb.push("LOWER(")
                .push(column(*field))
                .push(") LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\'");
        }

        Predicate::Range(field, range) => {
            qb.push("(");
            let mut bounded = false;
            if let Some(min) = range.min {
                qb.push("CAST(")
                    .push(column(*field))
                    .push(" AS INTEGER) >= ")
                    .push_bind(min);
                bounded = true;
            }
            if let Some(max) = range.max {
                if bounded {
                    qb.push(" AND ");
                }
                qb.push("CAST(")
                    .push(column(*field))
                    .push(" AS INTEGER) <= ")
                    .push_bind(max);
                bounded = true;
            }
            if !bounded {
                qb.push("1 = 1");
            }
            qb.push(")");
        }

        Predicate::And(children) => push_group(qb, children, " AND ", "1 = 1"),
        Predicate::Or(children) => push_group(qb, children, " OR ", "0 = 1"),
    }
}

fn push_group(qb: &mut QueryBuilder<'_, Sqlite>, children: &[Predicate], joiner: &str, empty: &str) {
    if children.is_empty() {
        qb.push(empty);
        return;
    }

    qb.push("(");
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            qb.push(joiner);
        }
        push_predicate(qb, child);
    }
    qb.push(")");
}

/// Translates a sort instruction to an ORDER BY expression.
///
/// Relevance (and an absent caller preference) maps to the default
/// ordering: display name, ascending, case-insensitive. Numeric columns
/// are CAST so they compare as numbers.
pub(crate) fn order_clause(order: OrderBy) -> String {
    let column = match order.key {
        SortKey::Relevance | SortKey::Name => "name COLLATE NOCASE",
        SortKey::Price => "CAST(price AS REAL)",
        SortKey::Stock => "CAST(stock_quantity AS REAL)",
        SortKey::Category => "category COLLATE NOCASE",
        SortKey::Barcode => "barcode",
        SortKey::Created => "created_at",
        SortKey::Modified => "updated_at",
    };

    let direction = match order.direction {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    format!("{column} {direction}")
}

/// Escapes LIKE metacharacters so user input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pricescan_core::{IntRange, StockFilter};

    fn rendered(predicate: &Predicate) -> String {
        let mut qb = QueryBuilder::new("");
        push_predicate(&mut qb, predicate);
        qb.into_sql()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_eq_and_like_render_binds() {
        let sql = rendered(&Predicate::active());
        assert_eq!(sql, "is_active = ?");

        let sql = rendered(&Predicate::Like(Field::Name, "cola".to_string()));
        assert_eq!(sql, "LOWER(name) LIKE ? ESCAPE '\\'");
    }

    #[test]
    fn test_price_equality_casts() {
        let sql = rendered(&Predicate::Eq(Field::Price, Literal::Number(500.0)));
        assert_eq!(sql, "CAST(price AS REAL) = ?");
    }

    #[test]
    fn test_stock_range_renders_bounds() {
        let low = Predicate::stock_in(StockFilter::LowStock).unwrap();
        assert_eq!(
            rendered(&low),
            "(CAST(stock_quantity AS INTEGER) >= ? AND CAST(stock_quantity AS INTEGER) <= ?)"
        );

        let open = Predicate::Range(Field::Stock, IntRange { min: None, max: None });
        assert_eq!(rendered(&open), "(1 = 1)");
    }

    #[test]
    fn test_groups_parenthesize_and_join() {
        let sql = rendered(&Predicate::And(vec![
            Predicate::active(),
            Predicate::Or(vec![
                Predicate::Like(Field::Name, "a".to_string()),
                Predicate::Like(Field::Barcode, "a".to_string()),
            ]),
        ]));
        assert_eq!(
            sql,
            "(is_active = ? AND (LOWER(name) LIKE ? ESCAPE '\\' OR LOWER(barcode) LIKE ? ESCAPE '\\'))"
        );
    }

    #[test]
    fn test_empty_groups_have_identities() {
        assert_eq!(rendered(&Predicate::And(vec![])), "1 = 1");
        assert_eq!(rendered(&Predicate::Or(vec![])), "0 = 1");
    }

    #[test]
    fn test_order_clause_mappings() {
        let asc = |key| OrderBy {
            key,
            direction: SortOrder::Asc,
        };
        assert_eq!(order_clause(asc(SortKey::Relevance)), "name COLLATE NOCASE ASC");
        assert_eq!(order_clause(asc(SortKey::Price)), "CAST(price AS REAL) ASC");
        assert_eq!(
            order_clause(OrderBy {
                key: SortKey::Stock,
                direction: SortOrder::Desc
            }),
            "CAST(stock_quantity AS REAL) DESC"
        );
        assert_eq!(order_clause(asc(SortKey::Modified)), "updated_at ASC");
    }
}
