//! Create operation_log table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OperationLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OperationLog::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OperationLog::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperationLog::Structure).string().not_null())
                    .col(ColumnDef::new(OperationLog::Operation).string().not_null())
                    .col(
                        ColumnDef::new(OperationLog::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperationLog::Source).string())
                    .col(
                        ColumnDef::new(OperationLog::ProductCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operation_log_timestamp")
                    .table(OperationLog::Table)
                    .col(OperationLog::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OperationLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum OperationLog {
    Table,
    Id,
    Timestamp,
    Structure,
    Operation,
    Description,
    Source,
    ProductCount,
}
