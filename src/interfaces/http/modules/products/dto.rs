//! Product DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::product::Product;
use crate::interfaces::http::common::{default_limit, default_page};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub status: String,
    pub priority: i32,
    pub supplier: Option<String>,
    pub price: Option<f64>,
    pub added_date: NaiveDate,
    pub days_until_expiry: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        let days_until_expiry = p.days_until_expiry(Utc::now().date_naive());
        Self {
            id: p.id,
            name: p.name,
            category: p.category,
            quantity: p.quantity,
            expiry_date: p.expiry_date,
            status: p.status.to_string(),
            priority: p.priority,
            supplier: p.supplier,
            price: p.price,
            added_date: p.added_date,
            days_until_expiry,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "product name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "category is required"))]
    pub category: String,
    #[validate(range(min = 0, message = "quantity must be non-negative"))]
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub supplier: Option<String>,
    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "product name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "category must not be empty"))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "quantity must be non-negative"))]
    pub quantity: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub supplier: Option<String>,
    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    pub price: Option<f64>,
}

/// List query: filters, sort and pagination, recomputed on every request.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListProductsParams {
    /// Free-text search across name, category, id and supplier
    pub q: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Status filter: "Healthy", "Expiring Soon" or "Expired"
    pub status: Option<String>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    /// Inclusive expiry-date range start (YYYY-MM-DD)
    pub expires_from: Option<NaiveDate>,
    /// Inclusive expiry-date range end (YYYY-MM-DD)
    pub expires_to: Option<NaiveDate>,
    /// Sort column: name, category, quantity, expiry_date, added_date,
    /// price, status or priority. Default: expiry_date
    pub sort_by: Option<String>,
    /// Sort direction: "asc" or "desc". Default: asc
    pub order: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Search text
    pub q: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExpiringParams {
    /// Window in days. Default: 7
    #[serde(default = "default_expiring_days")]
    pub days: i64,
}

fn default_expiring_days() -> i64 {
    7
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LowStockParams {
    /// Quantity threshold. Default: 10
    #[serde(default = "default_low_stock_threshold")]
    pub threshold: i32,
}

fn default_low_stock_threshold() -> i32 {
    10
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentParams {
    /// Maximum records to return. Default: 5
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

fn default_recent_limit() -> usize {
    5
}
