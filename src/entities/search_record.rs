//! One record schema shared by all three tables. The tables differ only in
//! retention policy, so statements are built from a single column set and a
//! table selector instead of three copy-pasted entity types.

use sea_orm::{DeriveIden, FromQueryResult};
use sea_orm::sea_query::Alias;

use crate::models::Product;

/// Column set for every search-record table.
#[derive(DeriveIden)]
pub enum SearchRecords {
    Id,
    Query,
    Title,
    Price,
    Rating,
    ReviewCount,
    ProductUrl,
    ImageUrl,
    Valid,
    Timestamp,
}

/// Selects which physical table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreTable {
    /// Append-only archive of every scrape.
    Permanent,
    /// Cleared and repopulated on every live search.
    LiveScratch,
    /// Cleared and repopulated on every history request.
    HistoryScratch,
}

impl StoreTable {
    pub const ALL: [Self; 3] = [Self::Permanent, Self::LiveScratch, Self::HistoryScratch];

    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Permanent => "search_records",
            Self::LiveScratch => "live_results",
            Self::HistoryScratch => "history_results",
        }
    }

    #[must_use]
    pub const fn timestamp_index_name(self) -> &'static str {
        match self {
            Self::Permanent => "idx_search_records_timestamp",
            Self::LiveScratch => "idx_live_results_timestamp",
            Self::HistoryScratch => "idx_history_results_timestamp",
        }
    }

    #[must_use]
    pub fn iden(self) -> Alias {
        Alias::new(self.table_name())
    }
}

/// Row as read back from any of the three tables.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SearchRecordRow {
    pub id: i32,
    pub query: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub product_url: Option<String>,
    pub image_url: Option<String>,
    pub valid: bool,
    pub timestamp: String,
}

impl From<SearchRecordRow> for Product {
    fn from(row: SearchRecordRow) -> Self {
        Self {
            title: row.title.unwrap_or_default(),
            price: row.price,
            rating: row.rating,
            review_count: row.review_count,
            product_url: row.product_url,
            image_url: row.image_url,
            valid: row.valid,
            timestamp: row.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            StoreTable::ALL.iter().map(|t| t.table_name()).collect();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn row_converts_to_product() {
        let row = SearchRecordRow {
            id: 1,
            query: "headphones".to_string(),
            title: Some("Over-Ear Headphones".to_string()),
            price: Some(49.99),
            rating: Some(4.2),
            review_count: Some(88),
            product_url: Some("https://www.amazon.com/dp/X".to_string()),
            image_url: Some("https://img/x.jpg".to_string()),
            valid: true,
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        };

        let product = Product::from(row);
        assert_eq!(product.title, "Over-Ear Headphones");
        assert_eq!(product.price, Some(49.99));
        assert!(product.valid);
    }
}
