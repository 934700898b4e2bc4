//! Create store_profile table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StoreProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoreProfile::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StoreProfile::Name).string().not_null())
                    .col(ColumnDef::new(StoreProfile::Email).string().not_null())
                    .col(
                        ColumnDef::new(StoreProfile::Role)
                            .string()
                            .not_null()
                            .default("admin"),
                    )
                    .col(ColumnDef::new(StoreProfile::StoreName).string().not_null())
                    .col(
                        ColumnDef::new(StoreProfile::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StoreProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum StoreProfile {
    Table,
    Id,
    Name,
    Email,
    Role,
    StoreName,
    UpdatedAt,
}
