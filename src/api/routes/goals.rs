//! Goal endpoints
//!
//! Listing and creation live under the owning department or group; direct
//! access by id is handled here.

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;
use axum::{Extension, Router};

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::goal::{Goal, UpdateGoalRequest};
use crate::services::auth::{AuthContext, Permission};

/// GET /api/goals/{id}
/// Full record, used to pre-populate the edit form
pub async fn get_goal(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(goal_id): Path<i64>,
) -> ApiResult<Goal> {
    let goal = state.services.goal_service.get(ctx.church_id, goal_id).await?;

    Ok(Json(ApiResponse::success(goal)))
}

/// PUT /api/goals/{id}
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(goal_id): Path<i64>,
    Json(payload): Json<UpdateGoalRequest>,
) -> ApiResult<Goal> {
    ctx.require(Permission::ManageRecords)?;

    let goal = state
        .services
        .goal_service
        .update(ctx.church_id, goal_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(goal)))
}

/// DELETE /api/goals/{id}
pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(goal_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .goal_service
        .delete(ctx.church_id, goal_id)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/goals/:id",
        get(get_goal).put(update_goal).delete(delete_goal),
    )
}
