//! Operation-log entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Operation-log model - bounded cosmetic action history
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operation_log")]
pub struct Model {
    /// Opaque entry id ("log_" prefix)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// When the operation happened
    pub timestamp: DateTime<Utc>,

    /// Structure label, e.g. "STACK"
    pub structure: String,

    /// Operation label, e.g. "PUSH"
    pub operation: String,

    /// Human-readable description
    pub description: String,

    /// Page or service that triggered the operation
    pub source: Option<String>,

    /// Product count at the time of logging
    pub product_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
