use anyhow::Result;
use tracing::info;

use crate::db::Store;
use crate::entities::StoreTable;
use crate::models::{Product, ProductFilter};

/// Read side of the pipeline: history replay plus filter/sort retrieval
/// against the two scratch tables. Stateless per call; the same filter
/// applied twice yields the same result set.
pub struct QueryService {
    store: Store,
}

impl QueryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Repopulates the historical scratch table from permanent storage and
    /// returns the matching records, newest first. Failures propagate:
    /// a stale scratch table must never be filtered silently.
    pub async fn history(&self, query: &str) -> Result<Vec<Product>> {
        info!("Loading history for query '{query}'");
        self.store.copy_to_history(query).await
    }

    pub async fn filter_live(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        self.store.filter(StoreTable::LiveScratch, filter).await
    }

    pub async fn filter_history(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        self.store.filter(StoreTable::HistoryScratch, filter).await
    }

    /// Unfiltered dump of one scratch table, used for "total found" counts.
    pub async fn all_of(&self, table: StoreTable) -> Result<Vec<Product>> {
        self.store.all(table).await
    }

    /// Transactional clear of any table; failures propagate.
    pub async fn clear(&self, table: StoreTable) -> Result<()> {
        self.store.clear(table).await
    }
}
