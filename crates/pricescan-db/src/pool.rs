//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled: readers don't block
//! writers and vice versa, which matters when scan lookups and catalog
//! searches arrive concurrently.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::history::PriceHistoryRepository;
use crate::repository::product::ProductRepository;
use crate::repository::scan::ScanRepository;
use pricescan_core::{CatalogStats, Product, ProductAnalytics};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/pricescan.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    pub min_connections: u32,

    /// Connection timeout duration.
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path. The file
    /// is created on first connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./pricescan.db")).await?;
///
/// // Repositories
/// let product = db.products().get_by_barcode("6111000000028").await?;
///
/// // Higher-level flows
/// let product = db.resolve_scan("6111000000028").await?; // also logs the scan
/// let analytics = db.analytics(&product.unwrap().id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool and, unless disabled,
    /// applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates the file if it doesn't exist (mode=rwc)
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations. Idempotent; called automatically by
    /// `new()` unless disabled in the config.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool, for queries not
    /// covered by the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the price-history repository.
    pub fn price_history(&self) -> PriceHistoryRepository {
        PriceHistoryRepository::new(self.pool.clone())
    }

    /// Returns the scan-log repository.
    pub fn scans(&self) -> ScanRepository {
        ScanRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    // =========================================================================
    // Storage-Level Flows
    // =========================================================================

    /// Resolves a scanned barcode to its product and logs the scan event.
    ///
    /// Unknown barcodes return `Ok(None)` and log nothing.
    pub async fn resolve_scan(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product = match self.products().get_by_barcode(barcode).await? {
            Some(product) => product,
            None => return Ok(None),
        };

        self.scans().record(&product.id).await?;

        Ok(Some(product))
    }

    /// Assembles price analytics for a product: min/max/avg over its
    /// recorded prices (falling back to the current price when no history
    /// exists) plus its scan count.
    pub async fn analytics(&self, product_id: &str) -> DbResult<Option<ProductAnalytics>> {
        let product = match self.products().get_by_id(product_id).await? {
            Some(product) => product,
            None => return Ok(None),
        };

        let stats = self.price_history().price_stats(product_id).await?;
        let scan_count = self.scans().count_for_product(product_id).await?;

        let current = product.price_value().unwrap_or(0.0);
        let (min_price, max_price, avg_price) = stats.unwrap_or((current, current, current));

        Ok(Some(ProductAnalytics {
            product,
            min_price,
            max_price,
            avg_price,
            scan_count,
        }))
    }

    /// Catalog-wide counters for the dashboard.
    pub async fn stats(&self) -> DbResult<CatalogStats> {
        let total_products = self.products().count_active().await? as u64;
        let scans_today = self.scans().count_today().await?;

        Ok(CatalogStats {
            total_products,
            scans_today,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::product::generate_product_id;
    use chrono::Utc;

    fn sample(name: &str, barcode: &str, price: &str) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            barcode: barcode.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            stock_quantity: "5".to_string(),
            category: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_resolve_scan_logs_the_event() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = sample("Boss Classic Cola", "6111000000028", "500.00");
        db.products().insert(&product).await.unwrap();

        let resolved = db.resolve_scan("6111000000028").await.unwrap().unwrap();
        assert_eq!(resolved.id, product.id);
        assert_eq!(db.scans().count_for_product(&product.id).await.unwrap(), 1);

        // Unknown barcodes resolve to nothing and log nothing.
        assert!(db.resolve_scan("0000000000000").await.unwrap().is_none());
        assert_eq!(db.stats().await.unwrap().scans_today, 1);
    }

    #[tokio::test]
    async fn test_analytics_falls_back_to_current_price() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = sample("Olive Oil Premium", "8402310198125", "500.00");
        db.products().insert(&product).await.unwrap();

        let analytics = db.analytics(&product.id).await.unwrap().unwrap();
        assert_eq!(analytics.min_price, 500.0);
        assert_eq!(analytics.max_price, 500.0);
        assert_eq!(analytics.avg_price, 500.0);
        assert_eq!(analytics.scan_count, 0);

        db.price_history()
            .record(&product.id, "450.00", 1)
            .await
            .unwrap();
        db.price_history()
            .record(&product.id, "550.00", 2)
            .await
            .unwrap();

        let analytics = db.analytics(&product.id).await.unwrap().unwrap();
        assert_eq!(analytics.min_price, 450.0);
        assert_eq!(analytics.max_price, 550.0);

        assert!(db.analytics("missing-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stats_counts_active_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let keep = sample("A", "1", "1.00");
        let drop = sample("B", "2", "1.00");
        db.products().insert(&keep).await.unwrap();
        db.products().insert(&drop).await.unwrap();
        db.products().deactivate(&drop.id).await.unwrap();

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_products, 1);
        assert_eq!(stats.scans_today, 0);
    }
}
