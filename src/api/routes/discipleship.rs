//! Discipleship endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::discipleship::{
    AssignMentorRequest, CreateDiscipleRequest, CreateMentorRequest, Disciple, DiscipleStatus,
    DiscipleshipStage, Mentor, UpdateDiscipleRequest, UpdateMentorRequest,
};
use crate::models::{Paged, Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/discipleship/mentors
pub async fn list_mentors(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Paged<Mentor>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state
        .services
        .discipleship_service
        .list_mentors(ctx.church_id, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/discipleship/mentors
pub async fn create_mentor(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateMentorRequest>,
) -> ApiResult<Mentor> {
    ctx.require(Permission::ManageRecords)?;

    let mentor = state
        .services
        .discipleship_service
        .create_mentor(ctx.church_id, payload)
        .await?;

    Ok(Json(ApiResponse::success(mentor)))
}

/// PUT /api/discipleship/mentors/{id}
pub async fn update_mentor(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(mentor_id): Path<i64>,
    Json(payload): Json<UpdateMentorRequest>,
) -> ApiResult<Mentor> {
    ctx.require(Permission::ManageRecords)?;

    let mentor = state
        .services
        .discipleship_service
        .update_mentor(ctx.church_id, mentor_id, payload)
        .await?;

    Ok(Json(ApiResponse::success(mentor)))
}

#[derive(Debug, Deserialize)]
pub struct DiscipleListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub mentor_id: Option<i64>,
    pub status: Option<DiscipleStatus>,
}

/// GET /api/discipleship/disciples
pub async fn list_disciples(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<DiscipleListQuery>,
) -> ApiResult<Paged<Disciple>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state
        .services
        .discipleship_service
        .list_disciples(ctx.church_id, query.mentor_id, query.status, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/discipleship/disciples/{id}
pub async fn get_disciple(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(disciple_id): Path<i64>,
) -> ApiResult<Disciple> {
    let disciple = state
        .services
        .discipleship_service
        .get_disciple(ctx.church_id, disciple_id)
        .await?;

    Ok(Json(ApiResponse::success(disciple)))
}

/// POST /api/discipleship/disciples
pub async fn create_disciple(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateDiscipleRequest>,
) -> ApiResult<Disciple> {
    ctx.require(Permission::ManageRecords)?;

    let disciple = state
        .services
        .discipleship_service
        .create_disciple(ctx.church_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(disciple)))
}

/// PUT /api/discipleship/disciples/{id}
pub async fn update_disciple(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(disciple_id): Path<i64>,
    Json(payload): Json<UpdateDiscipleRequest>,
) -> ApiResult<Disciple> {
    ctx.require(Permission::ManageRecords)?;

    let disciple = state
        .services
        .discipleship_service
        .update_disciple(ctx.church_id, disciple_id, payload)
        .await?;

    Ok(Json(ApiResponse::success(disciple)))
}

/// POST /api/discipleship/disciples/{id}/assign
/// Assign a mentor, honoring mentor capacity
pub async fn assign_mentor(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(disciple_id): Path<i64>,
    Json(payload): Json<AssignMentorRequest>,
) -> ApiResult<Disciple> {
    ctx.require(Permission::ManageRecords)?;

    let disciple = state
        .services
        .discipleship_service
        .assign_mentor(ctx.church_id, disciple_id, payload.mentor_id)
        .await?;

    Ok(Json(ApiResponse::success(disciple)))
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress: i32,
    pub stage: Option<DiscipleshipStage>,
}

/// PUT /api/discipleship/disciples/{id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(disciple_id): Path<i64>,
    Json(payload): Json<ProgressRequest>,
) -> ApiResult<Disciple> {
    ctx.require(Permission::ManageRecords)?;

    let disciple = state
        .services
        .discipleship_service
        .update_progress(ctx.church_id, disciple_id, payload.progress, payload.stage)
        .await?;

    Ok(Json(ApiResponse::success(disciple)))
}

/// DELETE /api/discipleship/disciples/{id}
pub async fn delete_disciple(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(disciple_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .discipleship_service
        .delete_disciple(ctx.church_id, disciple_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/discipleship/mentors",
            get(list_mentors).post(create_mentor),
        )
        .route("/discipleship/mentors/:id", put(update_mentor))
        .route(
            "/discipleship/disciples",
            get(list_disciples).post(create_disciple),
        )
        .route(
            "/discipleship/disciples/:id",
            get(get_disciple)
                .put(update_disciple)
                .delete(delete_disciple),
        )
        .route("/discipleship/disciples/:id/assign", post(assign_mentor))
        .route("/discipleship/disciples/:id/progress", put(update_progress))
}
