//! Member roster endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, put};
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::member::{
    CreateMemberRequest, Member, MemberFilter, MembershipStatus, UpdateMemberRequest,
};
use crate::models::{Paged, Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};

#[derive(Debug, Deserialize)]
pub struct MemberListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<MembershipStatus>,
}

/// GET /api/members
/// Page through the roster with search and status filter
pub async fn list_members(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<MemberListQuery>,
) -> ApiResult<Paged<Member>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let filter = MemberFilter {
        search: query.search,
        status: query.status,
    };

    let page = state
        .services
        .member_service
        .list(ctx.church_id, filter, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/members/{id}
/// Full record, used to pre-populate the edit form
pub async fn get_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(member_id): Path<i64>,
) -> ApiResult<Member> {
    let member = state
        .services
        .member_service
        .get(ctx.church_id, member_id)
        .await?;

    Ok(Json(ApiResponse::success(member)))
}

/// POST /api/members
/// Add a member to the roll
pub async fn create_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateMemberRequest>,
) -> ApiResult<Member> {
    ctx.require(Permission::ManageRecords)?;

    let member = state
        .services
        .member_service
        .create(ctx.church_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(member)))
}

/// PUT /api/members/{id}
/// Update a member profile; absent fields keep their stored values
pub async fn update_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(member_id): Path<i64>,
    Json(payload): Json<UpdateMemberRequest>,
) -> ApiResult<Member> {
    ctx.require(Permission::ManageRecords)?;

    let member = state
        .services
        .member_service
        .update(ctx.church_id, member_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(member)))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: MembershipStatus,
}

/// PUT /api/members/{id}/status
/// Change membership status
pub async fn set_member_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(member_id): Path<i64>,
    Json(payload): Json<SetStatusRequest>,
) -> ApiResult<Member> {
    ctx.require(Permission::ManageRecords)?;

    let member = state
        .services
        .member_service
        .set_status(ctx.church_id, member_id, payload.status)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(member)))
}

/// DELETE /api/members/{id}
/// Remove a member; success is reported only after actual removal
pub async fn delete_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(member_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .member_service
        .delete(ctx.church_id, member_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route(
            "/members/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/members/:id/status", put(set_member_status))
}
