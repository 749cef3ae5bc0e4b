//! Dashboard statistics endpoints

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::{Extension, Router};

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::services::auth::AuthContext;
use crate::services::stats::DashboardStats;

/// GET /api/stats/dashboard
/// Server-aggregated dashboard counters for the authenticated tenant
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<DashboardStats> {
    let stats = state.services.stats_service.dashboard(ctx.church_id).await?;

    Ok(Json(ApiResponse::success(stats)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stats/dashboard", get(dashboard))
}
