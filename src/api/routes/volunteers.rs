//! Volunteer endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::volunteer::{
    CreateVolunteerRequest, UpdateVolunteerRequest, Volunteer, VolunteerFilter, VolunteerStatus,
};
use crate::models::{Paged, Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};

#[derive(Debug, Deserialize)]
pub struct VolunteerListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<VolunteerStatus>,
    pub department_id: Option<i64>,
}

/// GET /api/volunteers
pub async fn list_volunteers(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<VolunteerListQuery>,
) -> ApiResult<Paged<Volunteer>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let filter = VolunteerFilter {
        search: query.search,
        status: query.status,
        department_id: query.department_id,
    };

    let page = state
        .services
        .volunteer_service
        .list(ctx.church_id, filter, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/volunteers/{id}
pub async fn get_volunteer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(volunteer_id): Path<i64>,
) -> ApiResult<Volunteer> {
    let volunteer = state
        .services
        .volunteer_service
        .get(ctx.church_id, volunteer_id)
        .await?;

    Ok(Json(ApiResponse::success(volunteer)))
}

/// POST /api/volunteers
pub async fn create_volunteer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateVolunteerRequest>,
) -> ApiResult<Volunteer> {
    ctx.require(Permission::ManageRecords)?;

    let volunteer = state
        .services
        .volunteer_service
        .create(ctx.church_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(volunteer)))
}

/// PUT /api/volunteers/{id}
pub async fn update_volunteer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(volunteer_id): Path<i64>,
    Json(payload): Json<UpdateVolunteerRequest>,
) -> ApiResult<Volunteer> {
    ctx.require(Permission::ManageRecords)?;

    let volunteer = state
        .services
        .volunteer_service
        .update(ctx.church_id, volunteer_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(volunteer)))
}

/// POST /api/volunteers/{id}/approve
/// Move a pending volunteer to active
pub async fn approve_volunteer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(volunteer_id): Path<i64>,
) -> ApiResult<Volunteer> {
    ctx.require(Permission::ManageRecords)?;

    let volunteer = state
        .services
        .volunteer_service
        .approve(ctx.church_id, volunteer_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(volunteer)))
}

/// DELETE /api/volunteers/{id}
pub async fn delete_volunteer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(volunteer_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .volunteer_service
        .delete(ctx.church_id, volunteer_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/volunteers", get(list_volunteers).post(create_volunteer))
        .route(
            "/volunteers/:id",
            get(get_volunteer)
                .put(update_volunteer)
                .delete(delete_volunteer),
        )
        .route("/volunteers/:id/approve", post(approve_volunteer))
}
