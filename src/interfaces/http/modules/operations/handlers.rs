//! Operation log and simulator REST API handlers

use std::sync::Arc;

use axum::{extract::Query, extract::State, http::StatusCode, Json};

use super::dto::{
    ListOperationsParams, OperationEntryDto, SimulateRequest, SimulatedOperationDto,
};
use crate::application::simulator::{OperationTag, SimulationContext, SimulatorService};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::DomainError;
use crate::interfaces::http::common::ApiResponse;

#[derive(Clone)]
pub struct OperationsState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub simulator: Arc<SimulatorService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/operations",
    tag = "Operations",
    params(ListOperationsParams),
    responses(
        (status = 200, description = "Newest-first log slice", body = ApiResponse<Vec<OperationEntryDto>>)
    )
)]
pub async fn list_operations(
    State(state): State<OperationsState>,
    Query(params): Query<ListOperationsParams>,
) -> Result<Json<ApiResponse<Vec<OperationEntryDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.operations().recent(params.limit).await {
        Ok(entries) => Ok(Json(ApiResponse::success(
            entries.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to list operations: {}",
                e
            ))),
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/operations",
    tag = "Operations",
    responses(
        (status = 200, description = "Log cleared", body = ApiResponse<String>)
    )
)]
pub async fn clear_operations(
    State(state): State<OperationsState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.operations().clear().await {
        Ok(()) => Ok(Json(ApiResponse::success("Operation log cleared".to_string()))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to clear log: {}", e))),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/operations/simulate",
    tag = "Operations",
    request_body = SimulateRequest,
    responses(
        (status = 200, description = "Fabricated operation with display snippet", body = ApiResponse<SimulatedOperationDto>),
        (status = 400, description = "Unknown operation tag"),
        (status = 404, description = "Referenced product not found")
    )
)]
pub async fn simulate(
    State(state): State<OperationsState>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<ApiResponse<SimulatedOperationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(tag) = OperationTag::parse(&req.operation) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown operation: {}",
                req.operation
            ))),
        ));
    };

    let mut ctx = match req.product_id.as_deref() {
        Some(product_id) => match state.simulator.context_for_product(product_id).await {
            Ok(ctx) => ctx,
            Err(e @ DomainError::NotFound { .. }) => {
                return Err((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::error(e.to_string())),
                ));
            }
            Err(e) => {
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(format!("Failed to simulate: {}", e))),
                ));
            }
        },
        None => SimulationContext::default(),
    };
    ctx.search_term = req.search_term;

    let source = req.source.or_else(|| Some("dsa-demo".to_string()));
    match state.simulator.simulate(tag, ctx, source).await {
        Ok(op) => Ok(Json(ApiResponse::success(op.into()))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to simulate: {}", e))),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/operations/simulate/all",
    tag = "Operations",
    responses(
        (status = 200, description = "The canned demo sequence", body = ApiResponse<Vec<SimulatedOperationDto>>)
    )
)]
pub async fn simulate_all(
    State(state): State<OperationsState>,
) -> Result<Json<ApiResponse<Vec<SimulatedOperationDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .simulator
        .simulate_all(Some("dsa-demo".to_string()))
        .await
    {
        Ok(ops) => Ok(Json(ApiResponse::success(
            ops.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to simulate: {}", e))),
        )),
    }
}
