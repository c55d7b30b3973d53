//! # Scan Repository
//!
//! The barcode scan log: one row per scan event, driving per-product
//! scan counts and the "scans today" dashboard counter.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use pricescan_core::ScanEvent;

/// Repository for scan-log operations.
#[derive(Debug, Clone)]
pub struct ScanRepository {
    pool: SqlitePool,
}

impl ScanRepository {
    /// Creates a new ScanRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ScanRepository { pool }
    }

    /// Records a scan event for a product.
    pub async fn record(&self, product_id: &str) -> DbResult<ScanEvent> {
        debug!(product_id = %product_id, "Recording scan");

        let event = ScanEvent {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            scanned_at: Utc::now(),
        };

        sqlx::query("INSERT INTO product_scans (id, product_id, scanned_at) VALUES (?1, ?2, ?3)")
            .bind(&event.id)
            .bind(&event.product_id)
            .bind(event.scanned_at)
            .execute(&self.pool)
            .await?;

        Ok(event)
    }

    /// Counts all scans of one product.
    pub async fn count_for_product(&self, product_id: &str) -> DbResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM product_scans WHERE product_id = ?1")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count as u64)
    }

    /// Counts scans recorded today (UTC).
    pub async fn count_today(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM product_scans WHERE DATE(scanned_at) = DATE('now')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count as u64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
