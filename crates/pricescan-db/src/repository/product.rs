//! # Product Repository
//!
//! Catalog CRUD plus the search engine's storage capability.
//!
//! ## Search Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │               How Search Retrieval Works Here                       │
//! │                                                                     │
//! │  SearchEngine builds a Predicate (AST)                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  push_predicate() compiles it to a bound WHERE clause               │
//! │       │                                                             │
//! │       ├── count():     SELECT COUNT(*) ... WHERE <pred>             │
//! │       ├── query():     SELECT cols ... WHERE <pred>                 │
//! │       │                ORDER BY <sort> LIMIT ? OFFSET ?             │
//! │       └── query_all(): SELECT cols ... WHERE <pred>                 │
//! │                        ORDER BY name (stable retrieval order)       │
//! │                                                                     │
//! │  The initials ranking itself happens in pricescan-core, after       │
//! │  query_all() materializes the candidate set.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::sql::{order_clause, push_predicate, PRODUCT_COLUMNS};
use pricescan_core::{OrderBy, Predicate, Product, ProductStore, SearchResult};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// // Resolve a scanned barcode
/// let product = repo.get_by_barcode("6111000000028").await?;
///
/// // Drive a search
/// let engine = SearchEngine::new(repo);
/// let page = engine.search(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its barcode (the unique business key).
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        debug!(barcode = %barcode, "Looking up product by barcode");

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - barcode already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(barcode = %product.barcode, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, barcode, name, price, stock_quantity,
                category, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.barcode)
        .bind(&product.name)
        .bind(&product.price)
        .bind(&product.stock_quantity)
        .bind(&product.category)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product. `updated_at` is refreshed here.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                barcode = ?2,
                name = ?3,
                price = ?4,
                stock_quantity = ?5,
                category = ?6,
                is_active = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.barcode)
        .bind(&product.name)
        .bind(&product.price)
        .bind(&product.stock_quantity)
        .bind(&product.category)
        .bind(product.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deactivates a product so it no longer appears in search results.
    ///
    /// Historical price records and scans still reference it; the row is
    /// kept.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating product");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists the distinct categories of active products.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category FROM products
            WHERE category IS NOT NULL AND is_active = 1
            ORDER BY category COLLATE NOCASE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Counts active products.
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// ProductStore Implementation
// =============================================================================

/// The storage capability consumed by the search engine.
///
/// Predicates compile to bound WHERE clauses; failures cross the seam as
/// generic retrieval errors.
impl ProductStore for ProductRepository {
    async fn count(&self, filter: &Predicate) -> SearchResult<u64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products WHERE ");
        push_predicate(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(count as u64)
    }

    async fn query(
        &self,
        filter: &Predicate,
        order: OrderBy,
        limit: Option<u32>,
        offset: u32,
    ) -> SearchResult<Vec<Product>> {
        let mut qb =
            QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE "));
        push_predicate(&mut qb, filter);

        qb.push(" ORDER BY ").push(order_clause(order));

        match limit {
            Some(limit) => {
                qb.push(" LIMIT ")
                    .push_bind(limit as i64)
                    .push(" OFFSET ")
                    .push_bind(offset as i64);
            }
            // SQLite needs a LIMIT clause to accept OFFSET; -1 means
            // unbounded.
            None if offset > 0 => {
                qb.push(" LIMIT -1 OFFSET ").push_bind(offset as i64);
            }
            None => {}
        }

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        debug!(count = products.len(), "Search page fetched");
        Ok(products)
    }

    async fn query_all(&self, filter: &Predicate) -> SearchResult<Vec<Product>> {
        let mut qb =
            QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE "));
        push_predicate(&mut qb, filter);

        // Stable retrieval order: the ranker preserves it within each
        // relevance bucket.
        qb.push(" ORDER BY name COLLATE NOCASE ASC");

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        debug!(count = products.len(), "Full candidate set materialized");
        Ok(products)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use pricescan_core::{
        SearchEngine, SearchRequest, SortKey, SortOrder, StockFilter,
    };

    fn sample(name: &str, barcode: &str, price: &str, stock: &str, category: Option<&str>) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            barcode: barcode.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            stock_quantity: stock.to_string(),
            category: category.map(str::to_string),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded_db(products: &[Product]) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for product in products {
            db.products().insert(product).await.unwrap();
        }
        db
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_and_lookup_roundtrip() {
        let product = sample("Boss Classic Cola", "6111000000028", "500.00", "5", Some("Beverages"));
        let db = seeded_db(&[product.clone()]).await;

        let by_barcode = db
            .products()
            .get_by_barcode("6111000000028")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_barcode.id, product.id);
        assert_eq!(by_barcode.name, "Boss Classic Cola");
        assert_eq!(by_barcode.price, "500.00");
        assert!(by_barcode.is_active);

        let by_id = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(by_id.barcode, product.barcode);

        assert!(db.products().get_by_barcode("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_barcode_is_rejected() {
        let db = seeded_db(&[sample("A", "123", "1", "1", None)]).await;

        let dup = sample("B", "123", "2", "2", None);
        let err = db.products().insert(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_missing_update() {
        let mut product = sample("Old Name", "42", "1.00", "1", None);
        let db = seeded_db(&[product.clone()]).await;

        product.name = "New Name".to_string();
        product.price = "2.50".to_string();
        db.products().update(&product).await.unwrap();

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "New Name");
        assert_eq!(fetched.price, "2.50");

        let ghost = sample("Ghost", "43", "1", "1", None);
        let err = db.products().update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deactivated_products_vanish_from_search() {
        let keep = sample("Spring Water", "1", "80.00", "40", None);
        let drop = sample("Sparkling Water", "2", "90.00", "40", None);
        let db = seeded_db(&[keep, drop.clone()]).await;

        db.products().deactivate(&drop.id).await.unwrap();

        let engine = SearchEngine::new(db.products());
        let page = engine
            .search(&SearchRequest::new().query("water sparkling"))
            .await
            .unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.total, 0);

        let page = engine
            .search(&SearchRequest::new().query("spring water"))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_categories_are_distinct_and_sorted() {
        let db = seeded_db(&[
            sample("A", "1", "1", "1", Some("Snacks")),
            sample("B", "2", "1", "1", Some("Beverages")),
            sample("C", "3", "1", "1", Some("Snacks")),
            sample("D", "4", "1", "1", None),
        ])
        .await;

        let categories = db.products().categories().await.unwrap();
        assert_eq!(categories, vec!["Beverages".to_string(), "Snacks".to_string()]);
    }

    #[tokio::test]
    async fn test_price_sorts_numerically_in_sql() {
        let db = seeded_db(&[
            sample("Ten", "1", "10.00", "1", None),
            sample("Nine", "2", "9.00", "1", None),
            sample("Hundred", "3", "100.00", "1", None),
        ])
        .await;

        let engine = SearchEngine::new(db.products());
        let request = SearchRequest::new().sort(SortKey::Price, SortOrder::Asc);
        let page = engine.search(&request).await.unwrap();

        assert_eq!(names(&page.products), vec!["Nine", "Ten", "Hundred"]);
    }

    #[tokio::test]
    async fn test_like_metacharacters_match_literally() {
        let db = seeded_db(&[
            sample("100% Juice", "901", "3.00", "5", None),
            sample("1000 Juice Blend", "902", "3.00", "5", None),
        ])
        .await;

        let engine = SearchEngine::new(db.products());
        let page = engine
            .search(&SearchRequest::new().query("100% juice"))
            .await
            .unwrap();

        assert_eq!(names(&page.products), vec!["100% Juice"]);
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_initials_ranking_over_sqlite() {
        let db = seeded_db(&[
            sample("Plain Flour", "1", "120.50", "9", Some("Food")),
            sample("Boss Classic Cola", "2", "500.00", "5", Some("Beverages")),
            sample("Bella Cake Chocolate Cream", "3", "350.00", "12", Some("Snacks")),
        ])
        .await;

        let engine = SearchEngine::new(db.products());
        let page = engine
            .search(&SearchRequest::new().query("bcc"))
            .await
            .unwrap();

        // Retrieval order is by name, so the cake's BCCC leads the
        // cola's BCC within the initials bucket.
        assert_eq!(
            names(&page.products),
            vec!["Bella Cake Chocolate Cream", "Boss Classic Cola"]
        );
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_numeric_query_hits_exact_price_in_sql() {
        let db = seeded_db(&[
            sample("Olive Oil Premium", "843001", "500.00", "3", Some("Food")),
            sample("Cheap Soap", "843002", "2.50", "3", None),
        ])
        .await;

        let engine = SearchEngine::new(db.products());
        let page = engine
            .search(&SearchRequest::new().query("500"))
            .await
            .unwrap();

        assert_eq!(names(&page.products), vec!["Olive Oil Premium"]);
    }

    #[tokio::test]
    async fn test_stock_filter_boundaries_in_sql() {
        let db = seeded_db(&[
            sample("A", "1", "1", "0", None),
            sample("B", "2", "1", "5", None),
            sample("C", "3", "1", "9", None),
            sample("D", "4", "1", "10", None),
            sample("E", "5", "1", "15", None),
        ])
        .await;

        let engine = SearchEngine::new(db.products());
        let page = engine
            .search(&SearchRequest::new().stock(StockFilter::LowStock))
            .await
            .unwrap();
        assert_eq!(names(&page.products), vec!["B", "C"]);

        let page = engine
            .search(&SearchRequest::new().stock(StockFilter::OutOfStock))
            .await
            .unwrap();
        assert_eq!(names(&page.products), vec!["A"]);
    }

    #[tokio::test]
    async fn test_unbounded_limit_with_offset() {
        let products: Vec<Product> = (0..7)
            .map(|i| sample(&format!("Item {i}"), &format!("{i:03}"), "1.00", "1", None))
            .collect();
        let db = seeded_db(&products).await;

        let engine = SearchEngine::new(db.products());
        let page = engine
            .search(&SearchRequest::new().page(None, 5))
            .await
            .unwrap();

        assert_eq!(page.total, 7);
        assert_eq!(page.products.len(), 2);
    }
}
