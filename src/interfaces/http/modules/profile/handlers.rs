//! Store profile REST API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use super::dto::{ProfileDto, UpdateProfileRequest};
use crate::domain::profile::{ProfilePatch, StoreProfile};
use crate::domain::repositories::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::notifications::{Event, ProfileUpdatedEvent, SharedEventBus};

#[derive(Clone)]
pub struct ProfileState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub event_bus: SharedEventBus,
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Store profile", body = ApiResponse<ProfileDto>)
    )
)]
pub async fn get_profile(
    State(state): State<ProfileState>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.profile().get().await {
        // an unseeded store still answers with the defaults
        Ok(profile) => Ok(Json(ApiResponse::success(
            profile.unwrap_or_default().into(),
        ))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to get profile: {}", e))),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "Profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<ProfileDto>),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn update_profile(
    State(state): State<ProfileState>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let err = |e: crate::domain::DomainError| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to update profile: {}",
                e
            ))),
        )
    };

    let mut profile: StoreProfile = state
        .repos
        .profile()
        .get()
        .await
        .map_err(err)?
        .unwrap_or_default();

    profile.apply_patch(ProfilePatch {
        name: req.name,
        email: req.email,
        role: req.role,
        store_name: req.store_name,
    });

    let saved = state.repos.profile().set(profile).await.map_err(err)?;

    state
        .event_bus
        .publish(Event::ProfileUpdated(ProfileUpdatedEvent {
            name: saved.name.clone(),
            store_name: saved.store_name.clone(),
            timestamp: Utc::now(),
        }));

    Ok(Json(ApiResponse::success(saved.into())))
}
