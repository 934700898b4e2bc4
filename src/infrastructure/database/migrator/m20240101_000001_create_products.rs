//! Create products table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Category).string().not_null())
                    .col(
                        ColumnDef::new(Products::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Products::ExpiryDate).date().not_null())
                    .col(
                        ColumnDef::new(Products::Status)
                            .string()
                            .not_null()
                            .default("Healthy"),
                    )
                    .col(
                        ColumnDef::new(Products::Priority)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .col(ColumnDef::new(Products::Supplier).string())
                    .col(ColumnDef::new(Products::Price).double())
                    .col(ColumnDef::new(Products::AddedDate).date().not_null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_expiry_date")
                    .table(Products::Table)
                    .col(Products::ExpiryDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Products {
    Table,
    Id,
    Name,
    Category,
    Quantity,
    ExpiryDate,
    Status,
    Priority,
    Supplier,
    Price,
    AddedDate,
    CreatedAt,
    UpdatedAt,
}
