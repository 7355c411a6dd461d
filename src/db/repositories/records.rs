use anyhow::Result;
use sea_orm::sea_query::{Expr, NullOrdering, Order, Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, TransactionTrait};
use tracing::info;

use crate::entities::{SearchRecordRow, SearchRecords, StoreTable};
use crate::models::{Product, ProductFilter, SortOrder};

/// Single repository for all three record tables; every statement is built
/// from the shared column set with the target table passed in.
pub struct RecordRepository {
    conn: DatabaseConnection,
}

const INSERT_COLUMNS: [SearchRecords; 9] = [
    SearchRecords::Query,
    SearchRecords::Title,
    SearchRecords::Price,
    SearchRecords::Rating,
    SearchRecords::ReviewCount,
    SearchRecords::ProductUrl,
    SearchRecords::ImageUrl,
    SearchRecords::Valid,
    SearchRecords::Timestamp,
];

const SELECT_COLUMNS: [SearchRecords; 10] = [
    SearchRecords::Id,
    SearchRecords::Query,
    SearchRecords::Title,
    SearchRecords::Price,
    SearchRecords::Rating,
    SearchRecords::ReviewCount,
    SearchRecords::ProductUrl,
    SearchRecords::ImageUrl,
    SearchRecords::Valid,
    SearchRecords::Timestamp,
];

fn product_values(query: &str, product: &Product) -> [SimpleExpr; 9] {
    [
        Expr::value(query),
        Expr::value(product.title.clone()),
        Expr::value(product.price),
        Expr::value(product.rating),
        Expr::value(product.review_count),
        Expr::value(product.product_url.clone()),
        Expr::value(product.image_url.clone()),
        Expr::value(product.valid),
        Expr::value(product.timestamp.clone()),
    ]
}

fn row_values(row: &SearchRecordRow) -> [SimpleExpr; 9] {
    [
        Expr::value(row.query.clone()),
        Expr::value(row.title.clone()),
        Expr::value(row.price),
        Expr::value(row.rating),
        Expr::value(row.review_count),
        Expr::value(row.product_url.clone()),
        Expr::value(row.image_url.clone()),
        Expr::value(row.valid),
        Expr::value(row.timestamp.clone()),
    ]
}

impl RecordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts all records in one transaction; either every row lands or
    /// none do.
    pub async fn insert_many(
        &self,
        table: StoreTable,
        query: &str,
        products: &[Product],
    ) -> Result<()> {
        if products.is_empty() {
            return Ok(());
        }

        let mut insert = Query::insert();
        insert.into_table(table.iden()).columns(INSERT_COLUMNS);
        for product in products {
            insert.values(product_values(query, product))?;
        }

        let backend = self.conn.get_database_backend();
        let txn = self.conn.begin().await?;
        txn.execute(backend.build(&insert)).await?;
        txn.commit().await?;

        info!(
            "Saved {} records to {} for query '{query}'",
            products.len(),
            table.table_name()
        );
        Ok(())
    }

    /// Deletes every row from one table. Transactional: a failure leaves
    /// the table untouched and propagates, since stale scratch contents are
    /// unsafe to filter against.
    pub async fn clear(&self, table: StoreTable) -> Result<()> {
        let delete = Query::delete().from_table(table.iden()).to_owned();

        let backend = self.conn.get_database_backend();
        let txn = self.conn.begin().await?;
        let res = txn.execute(backend.build(&delete)).await?;
        txn.commit().await?;

        info!(
            "Cleared {} rows from {}",
            res.rows_affected(),
            table.table_name()
        );
        Ok(())
    }

    /// Replaces the historical scratch table with all permanent rows
    /// matching `query`, newest first, and returns them. Clear and copy
    /// share one transaction so a failure cannot leave the scratch table
    /// half-populated.
    pub async fn copy_to_history(&self, query: &str) -> Result<Vec<Product>> {
        let backend = self.conn.get_database_backend();

        let select = Query::select()
            .columns(SELECT_COLUMNS)
            .from(StoreTable::Permanent.iden())
            .and_where(Expr::col(SearchRecords::Query).eq(query))
            .order_by(SearchRecords::Timestamp, Order::Desc)
            .to_owned();

        let txn = self.conn.begin().await?;

        let rows = SearchRecordRow::find_by_statement(backend.build(&select))
            .all(&txn)
            .await?;

        let delete = Query::delete()
            .from_table(StoreTable::HistoryScratch.iden())
            .to_owned();
        txn.execute(backend.build(&delete)).await?;

        if !rows.is_empty() {
            let mut insert = Query::insert();
            insert
                .into_table(StoreTable::HistoryScratch.iden())
                .columns(INSERT_COLUMNS);
            for row in &rows {
                insert.values(row_values(row))?;
            }
            txn.execute(backend.build(&insert)).await?;
        }

        txn.commit().await?;

        info!(
            "Copied {} permanent records for query '{query}' into {}",
            rows.len(),
            StoreTable::HistoryScratch.table_name()
        );
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Filtered, sorted retrieval. Each threshold participates only when
    /// greater than zero. Rows with a null sort key sort last in both
    /// directions, so missing data never floats to the top of a listing.
    pub async fn filter(&self, table: StoreTable, filter: &ProductFilter) -> Result<Vec<Product>> {
        let mut select = Query::select();
        select.columns(SELECT_COLUMNS).from(table.iden());

        if filter.min_price > 0.0 {
            select.and_where(Expr::col(SearchRecords::Price).gte(filter.min_price));
        }
        if filter.max_price > 0.0 {
            select.and_where(Expr::col(SearchRecords::Price).lte(filter.max_price));
        }
        if filter.min_rating > 0.0 {
            select.and_where(Expr::col(SearchRecords::Rating).gte(filter.min_rating));
        }

        // Dedup collapses duplicate listings and only makes sense on the
        // historical scratch table, which accumulates repeats over time.
        if filter.dedup && table == StoreTable::HistoryScratch {
            select.group_by_columns([SearchRecords::Title, SearchRecords::Price]);
        }

        let order = match filter.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select.order_by_with_nulls(filter.sort_by.column(), order, NullOrdering::Last);

        let backend = self.conn.get_database_backend();
        let rows = SearchRecordRow::find_by_statement(backend.build(&select))
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Unfiltered dump of one table, newest first.
    pub async fn all(&self, table: StoreTable) -> Result<Vec<Product>> {
        let select = Query::select()
            .columns(SELECT_COLUMNS)
            .from(table.iden())
            .order_by(SearchRecords::Timestamp, Order::Desc)
            .to_owned();

        let backend = self.conn.get_database_backend();
        let rows = SearchRecordRow::find_by_statement(backend.build(&select))
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
