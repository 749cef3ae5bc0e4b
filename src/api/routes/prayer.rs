//! Prayer request endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, put};
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::prayer::{
    CreatePrayerRequest, PrayerCategory, PrayerFilter, PrayerRequest, PrayerStatus,
    UpdatePrayerRequest, UpdatePrayerStatusRequest,
};
use crate::models::{Paged, Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};

#[derive(Debug, Deserialize)]
pub struct PrayerListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<PrayerStatus>,
    pub category: Option<PrayerCategory>,
}

/// GET /api/prayer-requests
pub async fn list_prayer_requests(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<PrayerListQuery>,
) -> ApiResult<Paged<PrayerRequest>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let filter = PrayerFilter {
        search: query.search,
        status: query.status,
        category: query.category,
    };

    let page = state
        .services
        .prayer_service
        .list(ctx.church_id, filter, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/prayer-requests/{id}
pub async fn get_prayer_request(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(request_id): Path<i64>,
) -> ApiResult<PrayerRequest> {
    let prayer = state
        .services
        .prayer_service
        .get(ctx.church_id, request_id)
        .await?;

    Ok(Json(ApiResponse::success(prayer)))
}

/// POST /api/prayer-requests
pub async fn create_prayer_request(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreatePrayerRequest>,
) -> ApiResult<PrayerRequest> {
    ctx.require(Permission::ManageRecords)?;

    let prayer = state
        .services
        .prayer_service
        .create(ctx.church_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(prayer)))
}

/// PUT /api/prayer-requests/{id}
pub async fn update_prayer_request(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(request_id): Path<i64>,
    Json(payload): Json<UpdatePrayerRequest>,
) -> ApiResult<PrayerRequest> {
    ctx.require(Permission::ManageRecords)?;

    let prayer = state
        .services
        .prayer_service
        .update(ctx.church_id, request_id, payload)
        .await?;

    Ok(Json(ApiResponse::success(prayer)))
}

/// PUT /api/prayer-requests/{id}/status
/// Forward-only lifecycle transition
pub async fn set_prayer_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(request_id): Path<i64>,
    Json(payload): Json<UpdatePrayerStatusRequest>,
) -> ApiResult<PrayerRequest> {
    ctx.require(Permission::ManageRecords)?;

    let prayer = state
        .services
        .prayer_service
        .set_status(ctx.church_id, request_id, payload.status)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(prayer)))
}

/// DELETE /api/prayer-requests/{id}
pub async fn delete_prayer_request(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(request_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .prayer_service
        .delete(ctx.church_id, request_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/prayer-requests",
            get(list_prayer_requests).post(create_prayer_request),
        )
        .route(
            "/prayer-requests/:id",
            get(get_prayer_request)
                .put(update_prayer_request)
                .delete(delete_prayer_request),
        )
        .route("/prayer-requests/:id/status", put(set_prayer_status))
}
