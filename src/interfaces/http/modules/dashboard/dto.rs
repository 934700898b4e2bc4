//! Dashboard DTOs

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::services::InventoryStats;
use crate::interfaces::http::modules::products::ProductDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryStatsDto {
    pub total: u64,
    pub low_stock: u64,
    pub expiring_soon: u64,
    pub expired: u64,
    /// Product count per category
    pub categories: BTreeMap<String, u64>,
    /// Total inventory value (quantity × price), rounded to cents
    pub total_value: f64,
}

impl From<InventoryStats> for InventoryStatsDto {
    fn from(s: InventoryStats) -> Self {
        Self {
            total: s.total,
            low_stock: s.low_stock,
            expiring_soon: s.expiring_soon,
            expired: s.expired,
            categories: s.categories,
            total_value: (s.total_value * 100.0).round() / 100.0,
        }
    }
}

/// The most urgent record, with its clearance discount suggestion.
#[derive(Debug, Serialize, ToSchema)]
pub struct UrgentAlertDto {
    pub product: ProductDto,
    pub days_left: i64,
    pub discount_percent: u32,
}

/// One expiring-soon row in the alert list.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpiringAlertDto {
    pub product: ProductDto,
    pub days_left: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlertsDto {
    pub urgent: Option<UrgentAlertDto>,
    pub expiring: Vec<ExpiringAlertDto>,
}
