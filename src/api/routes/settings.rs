//! Tenant settings endpoints
//!
//! Church profile, preferences, and admin account management for the
//! authenticated tenant.

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, put};
use axum::{Extension, Router};

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::admin::{Admin, AdminCreated, CreateAdminRequest, UpdateAdminRequest};
use crate::models::church::{Church, UpdateChurchRequest, UpdateChurchSettingsRequest};
use crate::services::auth::{AuthContext, Permission};
use crate::utils::errors::ShepherdError;
use crate::utils::logging::log_admin_action;

/// GET /api/settings
/// Church profile and preferences for the authenticated tenant
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Church> {
    let church = state.services.church_service.get(ctx.church_id).await?;

    Ok(Json(ApiResponse::success(church)))
}

/// PUT /api/settings/profile
/// Update the church profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<UpdateChurchRequest>,
) -> ApiResult<Church> {
    ctx.require(Permission::ManageTenant)?;

    let church = state
        .services
        .church_service
        .update(ctx.church_id, payload)
        .await?;
    log_admin_action(ctx.admin_id, ctx.church_id, "update_profile", None);

    Ok(Json(ApiResponse::success(church)))
}

/// PUT /api/settings/preferences
/// Replace the tenant preferences blob
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<UpdateChurchSettingsRequest>,
) -> ApiResult<Church> {
    ctx.require(Permission::ManageTenant)?;

    let church = state
        .services
        .church_service
        .update_settings(ctx.church_id, payload)
        .await?;
    log_admin_action(ctx.admin_id, ctx.church_id, "update_preferences", None);

    Ok(Json(ApiResponse::success(church)))
}

/// GET /api/settings/admins
/// List admin accounts of the tenant
pub async fn list_admins(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Vec<Admin>> {
    ctx.require(Permission::ManageTenant)?;

    let admins = state.services.auth_service.list_admins(ctx.church_id).await?;

    Ok(Json(ApiResponse::success(admins)))
}

/// POST /api/settings/admins
/// Create an admin account
pub async fn create_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<CreateAdminRequest>,
) -> ApiResult<AdminCreated> {
    ctx.require(Permission::ManageTenant)?;

    let email = payload.email.clone();
    let created = state
        .services
        .auth_service
        .create_admin(ctx.church_id, payload)
        .await?;
    log_admin_action(ctx.admin_id, ctx.church_id, "create_admin", Some(&email));

    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/settings/admins/{id}
/// Update an admin account
pub async fn update_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(admin_id): Path<i64>,
    Json(payload): Json<UpdateAdminRequest>,
) -> ApiResult<Admin> {
    ctx.require(Permission::ManageTenant)?;

    let admin = state
        .services
        .auth_service
        .update_admin(ctx.church_id, admin_id, payload)
        .await?;
    log_admin_action(
        ctx.admin_id,
        ctx.church_id,
        "update_admin",
        Some(&admin_id.to_string()),
    );

    Ok(Json(ApiResponse::success(admin)))
}

/// DELETE /api/settings/admins/{id}
/// Remove an admin account. Self-deletion is rejected.
pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(admin_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageTenant)?;

    if admin_id == ctx.admin_id {
        return Err(ShepherdError::InvalidInput(
            "Cannot delete your own account".to_string(),
        )
        .into());
    }

    state
        .services
        .auth_service
        .delete_admin(ctx.church_id, admin_id)
        .await?;
    log_admin_action(
        ctx.admin_id,
        ctx.church_id,
        "delete_admin",
        Some(&admin_id.to_string()),
    );

    Ok(Json(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings))
        .route("/settings/profile", put(update_profile))
        .route("/settings/preferences", put(update_preferences))
        .route("/settings/admins", get(list_admins).post(create_admin))
        .route(
            "/settings/admins/:id",
            put(update_admin).delete(delete_admin),
        )
}
