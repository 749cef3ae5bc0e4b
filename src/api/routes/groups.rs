//! Small group endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{delete, get};
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::goal::{CreateGoalRequest, Goal, GoalFilter, GoalOwner, GoalPriority, GoalStatus};
use crate::models::group::{
    CreateGroupRequest, GroupMember, GroupWithOccupancy, JoinGroupRequest, SmallGroup,
    UpdateGroupRequest,
};
use crate::models::{Paged, Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};

#[derive(Debug, Deserialize)]
pub struct GroupListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/groups
/// Groups with current occupancy
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<GroupListQuery>,
) -> ApiResult<Paged<GroupWithOccupancy>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state
        .services
        .group_service
        .list(ctx.church_id, query.search, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(group_id): Path<i64>,
) -> ApiResult<GroupWithOccupancy> {
    let group = state
        .services
        .group_service
        .get(ctx.church_id, group_id)
        .await?;

    Ok(Json(ApiResponse::success(group)))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateGroupRequest>,
) -> ApiResult<SmallGroup> {
    ctx.require(Permission::ManageRecords)?;

    let group = state
        .services
        .group_service
        .create(ctx.church_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(group)))
}

/// PUT /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(group_id): Path<i64>,
    Json(payload): Json<UpdateGroupRequest>,
) -> ApiResult<SmallGroup> {
    ctx.require(Permission::ManageRecords)?;

    let group = state
        .services
        .group_service
        .update(ctx.church_id, group_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(group)))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(group_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .group_service
        .delete(ctx.church_id, group_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

/// GET /api/groups/{id}/members
pub async fn group_members(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(group_id): Path<i64>,
) -> ApiResult<Vec<GroupMember>> {
    let members = state
        .services
        .group_service
        .members(ctx.church_id, group_id)
        .await?;

    Ok(Json(ApiResponse::success(members)))
}

/// POST /api/groups/{id}/members
/// Join a group, honoring its capacity
pub async fn join_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(group_id): Path<i64>,
    Json(payload): Json<JoinGroupRequest>,
) -> ApiResult<GroupMember> {
    ctx.require(Permission::ManageRecords)?;

    let member = state
        .services
        .group_service
        .join(ctx.church_id, group_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(member)))
}

/// DELETE /api/groups/{id}/members/{member_id}
pub async fn leave_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((group_id, member_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .group_service
        .leave(ctx.church_id, group_id, member_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

#[derive(Debug, Deserialize)]
pub struct GoalListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
}

/// GET /api/groups/{id}/goals
pub async fn list_group_goals(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(group_id): Path<i64>,
    Query(query): Query<GoalListQuery>,
) -> ApiResult<Paged<Goal>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let filter = GoalFilter {
        search: query.search,
        status: query.status,
        priority: query.priority,
    };

    let page = state
        .services
        .goal_service
        .list(ctx.church_id, GoalOwner::Group(group_id), filter, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/groups/{id}/goals
pub async fn create_group_goal(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(group_id): Path<i64>,
    Json(payload): Json<CreateGoalRequest>,
) -> ApiResult<Goal> {
    ctx.require(Permission::ManageRecords)?;

    let goal = state
        .services
        .goal_service
        .create(ctx.church_id, GoalOwner::Group(group_id), payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(goal)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route(
            "/groups/:id",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route("/groups/:id/members", get(group_members).post(join_group))
        .route("/groups/:id/members/:member_id", delete(leave_group))
        .route(
            "/groups/:id/goals",
            get(list_group_goals).post(create_group_goal),
        )
}
