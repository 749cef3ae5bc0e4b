//! Health check endpoint

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::database::connection::health_check;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub database: bool,
    pub redis: bool,
    pub gateway_enabled: bool,
}

/// GET /api/health
/// Infrastructure health snapshot
pub async fn health(State(state): State<AppState>) -> ApiResult<HealthStatus> {
    let database = health_check(&state.db_pool).await.is_ok();
    let services = state.services.health_check().await;

    Ok(Json(ApiResponse::success(HealthStatus {
        database,
        redis: services.redis_healthy,
        gateway_enabled: services.gateway_enabled,
    })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
