//! HTTP API module
//!
//! Route composition, shared state, response envelope, and error mapping.

pub mod error;
pub mod response;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;

use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::settings::Settings;
use crate::database::DatabasePool;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::middleware::{log_requests, require_auth, RateLimiter};
use crate::services::ServiceFactory;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub settings: Settings,
    pub db_pool: DatabasePool,
    pub rate_limiter: RateLimiter,
}

/// Assemble the full API router
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .merge(routes::churches::public_router());

    let protected = Router::new()
        .merge(routes::churches::router())
        .merge(routes::settings::router())
        .merge(routes::members::router())
        .merge(routes::departments::router())
        .merge(routes::groups::router())
        .merge(routes::goals::router())
        .merge(routes::discipleship::router())
        .merge(routes::prayer::router())
        .merge(routes::volunteers::router())
        .merge(routes::communications::router())
        .merge(routes::stats::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
