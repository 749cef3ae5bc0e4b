//! Church tenant endpoints
//!
//! Registration is public; platform-level tenant management requires the
//! `super_admin` role.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::church::{Church, ChurchRegistration, RegisterChurchRequest};
use crate::models::{Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};
use crate::utils::helpers::calculate_offset;

/// POST /api/churches/register
/// Register a new church tenant and its first administrator
pub async fn register_church(
    State(state): State<AppState>,
    Json(payload): Json<RegisterChurchRequest>,
) -> ApiResult<ChurchRegistration> {
    let registration = state.services.church_service.register(payload).await?;

    Ok(Json(ApiResponse::success(registration)))
}

#[derive(Debug, Deserialize)]
pub struct ChurchListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/churches
/// List churches across the platform
pub async fn list_churches(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<ChurchListQuery>,
) -> ApiResult<Vec<Church>> {
    ctx.require(Permission::ManagePlatform)?;

    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let churches = state
        .services
        .church_service
        .list(
            pagination.limit,
            calculate_offset(pagination.page, pagination.limit),
        )
        .await?;

    Ok(Json(ApiResponse::success(churches)))
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// PUT /api/churches/{id}/active
/// Activate or deactivate a tenant
pub async fn set_church_active(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(church_id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> ApiResult<Church> {
    ctx.require(Permission::ManagePlatform)?;

    let church = state
        .services
        .church_service
        .set_active(church_id, payload.is_active)
        .await?;

    Ok(Json(ApiResponse::success(church)))
}

/// Routes that stay outside the auth layer
pub fn public_router() -> Router<AppState> {
    Router::new().route("/churches/register", post(register_church))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/churches", get(list_churches))
        .route("/churches/:id/active", put(set_church_active))
}
