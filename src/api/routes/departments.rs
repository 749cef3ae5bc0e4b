//! Department endpoints

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::department::{
    AddDepartmentMemberRequest, CreateDepartmentRequest, Department, DepartmentMember,
    DepartmentStats, RecordExpenseRequest, UpdateDepartmentRequest,
};
use crate::models::goal::{CreateGoalRequest, Goal, GoalFilter, GoalOwner, GoalPriority, GoalStatus};
use crate::models::{Paged, Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};

#[derive(Debug, Deserialize)]
pub struct DepartmentListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/departments
pub async fn list_departments(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<DepartmentListQuery>,
) -> ApiResult<Paged<Department>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state
        .services
        .department_service
        .list(ctx.church_id, query.search, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/departments/{id}
pub async fn get_department(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
) -> ApiResult<Department> {
    let department = state
        .services
        .department_service
        .get(ctx.church_id, department_id)
        .await?;

    Ok(Json(ApiResponse::success(department)))
}

/// POST /api/departments
pub async fn create_department(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateDepartmentRequest>,
) -> ApiResult<Department> {
    ctx.require(Permission::ManageRecords)?;

    let department = state
        .services
        .department_service
        .create(ctx.church_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(department)))
}

/// PUT /api/departments/{id}
pub async fn update_department(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
    Json(payload): Json<UpdateDepartmentRequest>,
) -> ApiResult<Department> {
    ctx.require(Permission::ManageRecords)?;

    let department = state
        .services
        .department_service
        .update(ctx.church_id, department_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(department)))
}

/// DELETE /api/departments/{id}
pub async fn delete_department(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .department_service
        .delete(ctx.church_id, department_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

/// GET /api/departments/{id}/members
pub async fn department_members(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
) -> ApiResult<Vec<DepartmentMember>> {
    let members = state
        .services
        .department_service
        .members(ctx.church_id, department_id)
        .await?;

    Ok(Json(ApiResponse::success(members)))
}

/// POST /api/departments/{id}/members
pub async fn add_department_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
    Json(payload): Json<AddDepartmentMemberRequest>,
) -> ApiResult<DepartmentMember> {
    ctx.require(Permission::ManageRecords)?;

    let member = state
        .services
        .department_service
        .add_member(ctx.church_id, department_id, payload)
        .await?;

    Ok(Json(ApiResponse::success(member)))
}

/// DELETE /api/departments/{id}/members/{member_id}
pub async fn remove_department_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((department_id, member_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .department_service
        .remove_member(ctx.church_id, department_id, member_id)
        .await?;

    Ok(Json(ApiResponse::success(())))
}

/// POST /api/departments/{id}/expenses
/// Record a spend against the budget
pub async fn record_expense(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
    Json(payload): Json<RecordExpenseRequest>,
) -> ApiResult<Department> {
    ctx.require(Permission::ManageRecords)?;

    let department = state
        .services
        .department_service
        .record_expense(ctx.church_id, department_id, payload)
        .await?;

    Ok(Json(ApiResponse::success(department)))
}

/// GET /api/departments/{id}/stats
pub async fn department_stats(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
) -> ApiResult<DepartmentStats> {
    let stats = state
        .services
        .department_service
        .stats(ctx.church_id, department_id)
        .await?;

    Ok(Json(ApiResponse::success(stats)))
}

#[derive(Debug, Deserialize)]
pub struct GoalListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
}

/// GET /api/departments/{id}/goals
pub async fn list_department_goals(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
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
        .list(
            ctx.church_id,
            GoalOwner::Department(department_id),
            filter,
            pagination,
        )
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/departments/{id}/goals
pub async fn create_department_goal(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(department_id): Path<i64>,
    Json(payload): Json<CreateGoalRequest>,
) -> ApiResult<Goal> {
    ctx.require(Permission::ManageRecords)?;

    let goal = state
        .services
        .goal_service
        .create(ctx.church_id, GoalOwner::Department(department_id), payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(goal)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments).post(create_department))
        .route(
            "/departments/:id",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
        .route(
            "/departments/:id/members",
            get(department_members).post(add_department_member),
        )
        .route(
            "/departments/:id/members/:member_id",
            delete(remove_department_member),
        )
        .route("/departments/:id/expenses", post(record_expense))
        .route("/departments/:id/stats", get(department_stats))
        .route(
            "/departments/:id/goals",
            get(list_department_goals).post(create_department_goal),
        )
}
