//! Dashboard REST API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use super::dto::{AlertsDto, ExpiringAlertDto, InventoryStatsDto, UrgentAlertDto};
use crate::application::services::InventoryService;
use crate::domain::product::discount_percent_for_days_left;
use crate::interfaces::http::common::ApiResponse;

/// Expiring-soon rows shown in the alert list.
const ALERT_ROWS: usize = 3;

#[derive(Clone)]
pub struct DashboardState {
    pub inventory: Arc<InventoryService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Inventory aggregates", body = ApiResponse<InventoryStatsDto>)
    )
)]
pub async fn get_stats(
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<InventoryStatsDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.inventory.stats().await {
        Ok(stats) => Ok(Json(ApiResponse::success(stats.into()))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to load stats: {}", e))),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/alerts",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Most urgent product and upcoming expiries", body = ApiResponse<AlertsDto>)
    )
)]
pub async fn get_alerts(
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<AlertsDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let err = |e: crate::domain::DomainError| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to load alerts: {}", e))),
        )
    };

    let today = Utc::now().date_naive();

    let urgent = state
        .inventory
        .most_urgent(Some("dashboard".to_string()))
        .await
        .map_err(err)?
        .map(|product| {
            let days_left = product.days_until_expiry(today);
            UrgentAlertDto {
                product: product.into(),
                days_left,
                discount_percent: discount_percent_for_days_left(days_left),
            }
        });

    let expiring = state
        .inventory
        .expiring_within(7)
        .await
        .map_err(err)?
        .into_iter()
        // the urgent card already covers the top record
        .filter(|p| {
            urgent
                .as_ref()
                .map(|u| u.product.id != p.id)
                .unwrap_or(true)
        })
        .take(ALERT_ROWS)
        .map(|product| {
            let days_left = product.days_until_expiry(today);
            ExpiringAlertDto {
                product: product.into(),
                days_left,
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(AlertsDto { urgent, expiring })))
}
