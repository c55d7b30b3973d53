//! # Price History Repository
//!
//! Recorded purchase prices per product, backing the price analytics
//! shown next to a scanned product (lowest / highest / average paid).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use pricescan_core::PriceHistoryEntry;

/// Repository for price-history operations.
#[derive(Debug, Clone)]
pub struct PriceHistoryRepository {
    pool: SqlitePool,
}

impl PriceHistoryRepository {
    /// Creates a new PriceHistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PriceHistoryRepository { pool }
    }

    /// Records a purchase price for a product.
    pub async fn record(
        &self,
        product_id: &str,
        price: &str,
        quantity: i64,
    ) -> DbResult<PriceHistoryEntry> {
        debug!(product_id = %product_id, price = %price, "Recording price");

        let entry = PriceHistoryEntry {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            price: price.to_string(),
            quantity,
            recorded_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO price_history (id, product_id, price, quantity, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.product_id)
        .bind(&entry.price)
        .bind(entry.quantity)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Lists a product's recorded prices, newest first.
    pub async fn for_product(&self, product_id: &str) -> DbResult<Vec<PriceHistoryEntry>> {
        let entries = sqlx::query_as::<_, PriceHistoryEntry>(
            r#"
            SELECT id, product_id, price, quantity, recorded_at
            FROM price_history
            WHERE product_id = ?1
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Returns (min, max, avg) over a product's recorded prices, or `None`
    /// when no history exists yet.
    pub async fn price_stats(&self, product_id: &str) -> DbResult<Option<(f64, f64, f64)>> {
        let row: (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            r#"
            SELECT
                MIN(CAST(price AS REAL)),
                MAX(CAST(price AS REAL)),
                AVG(CAST(price AS REAL))
            FROM price_history
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(match row {
            (Some(min), Some(max), Some(avg)) => Some((min, max, avg)),
            _ => None,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
