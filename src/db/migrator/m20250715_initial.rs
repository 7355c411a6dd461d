use sea_orm_migration::prelude::*;

use crate::entities::{SearchRecords, StoreTable};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in StoreTable::ALL {
            manager.create_table(record_table(table)).await?;
            manager.create_index(timestamp_index(table)).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in StoreTable::ALL {
            manager
                .drop_table(Table::drop().table(table.iden()).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

/// All three tables share this schema; only retention policy differs.
fn record_table(table: StoreTable) -> TableCreateStatement {
    Table::create()
        .table(table.iden())
        .if_not_exists()
        .col(
            ColumnDef::new(SearchRecords::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(SearchRecords::Query).string().not_null())
        .col(ColumnDef::new(SearchRecords::Title).string())
        .col(ColumnDef::new(SearchRecords::Price).double())
        .col(ColumnDef::new(SearchRecords::Rating).double())
        .col(ColumnDef::new(SearchRecords::ReviewCount).big_integer())
        .col(ColumnDef::new(SearchRecords::ProductUrl).string())
        .col(ColumnDef::new(SearchRecords::ImageUrl).string())
        .col(
            ColumnDef::new(SearchRecords::Valid)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(SearchRecords::Timestamp).string().not_null())
        .to_owned()
}

// Timestamp is the ordering key for newest-first reads.
fn timestamp_index(table: StoreTable) -> IndexCreateStatement {
    Index::create()
        .name(table.timestamp_index_name())
        .table(table.iden())
        .col(SearchRecords::Timestamp)
        .if_not_exists()
        .to_owned()
}
