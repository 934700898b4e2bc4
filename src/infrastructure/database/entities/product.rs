//! Product entity

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shelf status derived from the expiry date
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProductStatus {
    #[sea_orm(string_value = "Healthy")]
    Healthy,
    #[sea_orm(string_value = "Expiring Soon")]
    ExpiringSoon,
    #[sea_orm(string_value = "Expired")]
    Expired,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::ExpiringSoon => write!(f, "Expiring Soon"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

/// Product model - one tracked inventory record
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Opaque record id ("prod_" prefix)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Product name
    pub name: String,

    /// Category label (e.g., "Dairy", "Bakery")
    pub category: String,

    /// Units in stock
    pub quantity: i32,

    /// Calendar expiry date
    pub expiry_date: NaiveDate,

    /// Cached derived status
    pub status: ProductStatus,

    /// Cached derived priority (0 = most urgent, 4 = healthy)
    pub priority: i32,

    /// Supplier name (optional)
    pub supplier: Option<String>,

    /// Unit price (optional)
    pub price: Option<f64>,

    /// Calendar date the record was added
    pub added_date: NaiveDate,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
