//! Authentication endpoints

use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::admin::{LoginRequest, LoginResponse};

/// POST /api/auth/login
/// Authenticate an admin and issue a session token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let response = state.services.auth_service.login(payload).await?;

    Ok(Json(ApiResponse::success(response)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}
