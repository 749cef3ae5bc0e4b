//! Communication endpoints: direct messages and announcements

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::{Extension, Router};
use serde::Deserialize;

use crate::api::error::ApiResult;
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::models::communication::{
    Announcement, Audience, DeliveryStats, DeliveryStatus, Message, PublishAnnouncementRequest,
    SendMessageRequest,
};
use crate::models::{Paged, Pagination, DEFAULT_PAGE_SIZE};
use crate::services::auth::{AuthContext, Permission};

#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<DeliveryStatus>,
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<MessageListQuery>,
) -> ApiResult<Paged<Message>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state
        .services
        .communication_service
        .list_messages(ctx.church_id, query.status, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/messages
/// Send a direct message; delivery is one attempt whose outcome is recorded
pub async fn send_message(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<SendMessageRequest>,
) -> ApiResult<Message> {
    ctx.require(Permission::ManageRecords)?;

    let message = state
        .services
        .communication_service
        .send_message(ctx.church_id, ctx.admin_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(message)))
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub audience: Option<Audience>,
}

/// GET /api/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<AnnouncementListQuery>,
) -> ApiResult<Paged<Announcement>> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state
        .services
        .communication_service
        .list_announcements(ctx.church_id, query.audience, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/announcements
/// Publish an announcement to its audience
pub async fn publish_announcement(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<PublishAnnouncementRequest>,
) -> ApiResult<Announcement> {
    ctx.require(Permission::ManageRecords)?;

    let announcement = state
        .services
        .communication_service
        .publish_announcement(ctx.church_id, ctx.admin_id, payload)
        .await?;
    state.services.stats_service.invalidate(ctx.church_id).await;

    Ok(Json(ApiResponse::success(announcement)))
}

/// DELETE /api/announcements/{id}
/// Remove an announcement that was never published
pub async fn delete_announcement(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(announcement_id): Path<i64>,
) -> ApiResult<()> {
    ctx.require(Permission::ManageRecords)?;

    state
        .services
        .communication_service
        .delete_announcement(ctx.church_id, announcement_id)
        .await?;

    Ok(Json(ApiResponse::success(())))
}

/// GET /api/communications/templates
/// Available message template keys
pub async fn list_templates(
    State(state): State<AppState>,
    Extension(_ctx): Extension<AuthContext>,
) -> ApiResult<Vec<String>> {
    let mut keys = state.services.communication_service.template_keys();
    keys.sort();

    Ok(Json(ApiResponse::success(keys)))
}

/// GET /api/communications/stats
/// Delivery statistics since startup
pub async fn delivery_stats(
    State(state): State<AppState>,
    Extension(_ctx): Extension<AuthContext>,
) -> ApiResult<DeliveryStats> {
    let stats = state.services.communication_service.stats();

    Ok(Json(ApiResponse::success(stats)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list_messages).post(send_message))
        .route(
            "/announcements",
            get(list_announcements).post(publish_announcement),
        )
        .route(
            "/announcements/:id",
            axum::routing::delete(delete_announcement),
        )
        .route("/communications/templates", get(list_templates))
        .route("/communications/stats", get(delivery_stats))
}
