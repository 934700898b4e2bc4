//! Snapshot REST API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::ImportSummaryDto;
use crate::application::services::{Snapshot, SnapshotService};
use crate::domain::DomainError;
use crate::interfaces::http::common::ApiResponse;

#[derive(Clone)]
pub struct SnapshotState {
    pub snapshot: Arc<SnapshotService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/snapshot",
    tag = "Snapshot",
    responses(
        (status = 200, description = "Whole-state JSON document")
    )
)]
pub async fn export_snapshot(
    State(state): State<SnapshotState>,
) -> Result<Json<Snapshot>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.snapshot.export().await {
        // the snapshot IS the document, no envelope
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to export snapshot: {}",
                e
            ))),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/snapshot",
    tag = "Snapshot",
    request_body(content = String, content_type = "application/json"),
    responses(
        (status = 200, description = "Collections replaced", body = ApiResponse<ImportSummaryDto>),
        (status = 400, description = "Malformed document; nothing guaranteed replaced")
    )
)]
pub async fn import_snapshot(
    State(state): State<SnapshotState>,
    payload: String,
) -> Result<Json<ApiResponse<ImportSummaryDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.snapshot.import(&payload).await {
        Ok(summary) => Ok(Json(ApiResponse::success(summary.into()))),
        Err(e @ DomainError::ImportFailed(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to import snapshot: {}",
                e
            ))),
        )),
    }
}
