//! Authentication middleware
//!
//! Validates the bearer token on protected routes and makes the resulting
//! `AuthContext` available to handlers as a request extension.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::utils::errors::ShepherdError;

/// Axum middleware requiring a valid bearer token
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or_else(|| {
        ApiError(ShepherdError::Authentication(
            "Missing bearer token".to_string(),
        ))
    })?;

    let context = state.services.auth_service.verify_token(&token)?;
    debug!(
        admin_id = context.admin_id,
        church_id = context.church_id,
        "Request authenticated"
    );

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn request_with_auth(value: Option<&str>) -> Request {
        let mut builder = HttpRequest::builder().uri("/api/members");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = request_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&request).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        let request = request_with_auth(None);
        assert!(bearer_token(&request).is_none());
    }

    #[test]
    fn test_wrong_scheme() {
        let request = request_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&request).is_none());
    }

    #[test]
    fn test_empty_token() {
        let request = request_with_auth(Some("Bearer "));
        assert!(bearer_token(&request).is_none());
    }
}
