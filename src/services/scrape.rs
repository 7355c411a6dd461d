use std::time::Duration;
use tracing::{error, info, warn};

use crate::clients::AmazonClient;
use crate::config::MarketplaceConfig;
use crate::db::Store;
use crate::entities::StoreTable;
use crate::error::ScrapeError;
use crate::models::Product;
use crate::parser::parse_results;

/// Drives fetch → parse across N pages, aggregates the records and hands
/// them to the store.
pub struct ScrapeService {
    store: Store,
    client: AmazonClient,
    max_pages: u32,
    page_delay_min_ms: u64,
    page_delay_max_ms: u64,
}

impl ScrapeService {
    #[must_use]
    pub fn new(store: Store, client: AmazonClient, config: &MarketplaceConfig) -> Self {
        Self {
            store,
            client,
            max_pages: config.max_pages,
            page_delay_min_ms: config.page_delay_min_ms,
            page_delay_max_ms: config.page_delay_max_ms,
        }
    }

    /// Scrapes up to `max_pages` result pages sequentially.
    ///
    /// Page 1 failures are fatal. Failures on later pages are logged and
    /// the page is skipped, so one bad page never throws away the rest of
    /// the run. Pages are never fetched in parallel: the inter-page delay
    /// is the rate-limit courtesy and the fatal/non-fatal split only stays
    /// simple with a fixed order.
    pub async fn scrape(&self, query: &str, max_pages: u32) -> Result<Vec<Product>, ScrapeError> {
        let pages = max_pages.clamp(1, self.max_pages);
        info!("Starting scrape for query '{query}' ({pages} page(s))");

        let base = self.client.base_url();
        let mut products: Vec<Product> = Vec::new();

        for page in 1..=pages {
            if page > 1 {
                self.pause_between_pages().await;
            }

            let html = match self.client.fetch_page(query, page).await {
                Ok(html) => html,
                Err(e) if page == 1 => return Err(e),
                Err(e) => {
                    warn!("Skipping page {page} for query '{query}': {e}");
                    continue;
                }
            };

            match parse_results(&html, base) {
                Ok(page_products) => {
                    info!(
                        "Page {page} yielded {} product(s) for query '{query}'",
                        page_products.len()
                    );
                    products.extend(page_products);
                }
                Err(e) if page == 1 => return Err(e),
                Err(e) => {
                    warn!("Skipping unparseable page {page} for query '{query}': {e}");
                }
            }
        }

        // A persistence failure must not cost the caller the freshly
        // scraped data, so it is logged and swallowed here.
        if let Err(e) = self.persist(query, &products).await {
            error!("Failed to save search results for query '{query}': {e}");
        }

        info!(
            "Finished scrape for query '{query}': {} product(s)",
            products.len()
        );
        Ok(products)
    }

    /// Clears the live scratch table, then writes the batch to both the
    /// permanent and live tables. Each write is one transaction per table;
    /// the pair is not atomic across tables.
    async fn persist(&self, query: &str, products: &[Product]) -> anyhow::Result<()> {
        self.store.clear(StoreTable::LiveScratch).await?;
        self.store
            .insert_products(StoreTable::Permanent, query, products)
            .await?;
        self.store
            .insert_products(StoreTable::LiveScratch, query, products)
            .await?;
        Ok(())
    }

    async fn pause_between_pages(&self) {
        let span = self.page_delay_max_ms.saturating_sub(self.page_delay_min_ms);
        let jitter = if span == 0 {
            0
        } else {
            rand::random_range(0..=span)
        };
        tokio::time::sleep(Duration::from_millis(self.page_delay_min_ms + jitter)).await;
    }
}
