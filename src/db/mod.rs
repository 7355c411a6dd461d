use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

use crate::entities::StoreTable;
use crate::models::{Product, ProductFilter};
use repositories::records::RecordRepository;

/// Handle to the single sqlite database holding all three record tables.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn records_repo(&self) -> RecordRepository {
        RecordRepository::new(self.conn.clone())
    }

    /// Transactional multi-row insert into one table.
    pub async fn insert_products(
        &self,
        table: StoreTable,
        query: &str,
        products: &[Product],
    ) -> Result<()> {
        self.records_repo().insert_many(table, query, products).await
    }

    /// Transactional delete-all; failures propagate to the caller.
    pub async fn clear(&self, table: StoreTable) -> Result<()> {
        self.records_repo().clear(table).await
    }

    /// Replaces the historical scratch table with the permanent rows for
    /// `query`, newest first, and returns them.
    pub async fn copy_to_history(&self, query: &str) -> Result<Vec<Product>> {
        self.records_repo().copy_to_history(query).await
    }

    pub async fn filter(&self, table: StoreTable, filter: &ProductFilter) -> Result<Vec<Product>> {
        self.records_repo().filter(table, filter).await
    }

    pub async fn all(&self, table: StoreTable) -> Result<Vec<Product>> {
        self.records_repo().all(table).await
    }
}
