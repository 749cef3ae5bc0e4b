//! API error mapping
//!
//! Maps `ShepherdError` onto HTTP statuses and response bodies. Validation
//! failures keep their per-field detail; infrastructure failures are logged
//! and reported without leaking internals.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::{error, warn};

use crate::api::response::ApiResponse;
use crate::utils::errors::{ErrorSeverity, ShepherdError};

/// Error type returned by every API handler
#[derive(Debug)]
pub struct ApiError(pub ShepherdError);

impl From<ShepherdError> for ApiError {
    fn from(err: ShepherdError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            ShepherdError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ShepherdError::InvalidInput(_)
            | ShepherdError::InvalidStatusTransition { .. }
            | ShepherdError::GroupFull { .. }
            | ShepherdError::MentorAtCapacity { .. }
            | ShepherdError::BudgetExceeded { .. } => StatusCode::BAD_REQUEST,
            ShepherdError::ChurchNotFound { .. }
            | ShepherdError::MemberNotFound { .. }
            | ShepherdError::DepartmentNotFound { .. }
            | ShepherdError::GroupNotFound { .. }
            | ShepherdError::GoalNotFound { .. }
            | ShepherdError::PrayerRequestNotFound { .. }
            | ShepherdError::VolunteerNotFound { .. } => StatusCode::NOT_FOUND,
            ShepherdError::Authentication(_) | ShepherdError::Token(_) => StatusCode::UNAUTHORIZED,
            ShepherdError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ShepherdError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ShepherdError::ServiceUnavailable(_) | ShepherdError::Gateway(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ApiResponse<()> {
        match &self.0 {
            ShepherdError::Validation(errors) => match serde_json::to_value(errors) {
                Ok(details) => ApiResponse::error_with_details("Validation failed", details),
                Err(_) => ApiResponse::error("Validation failed"),
            },
            err if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR => {
                // Internals stay in the logs
                error!(error = %err, "Internal error");
                ApiResponse::error("Internal server error")
            }
            err => ApiResponse::error(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.0.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                error!(status = %status, error = %self.0, "Request failed");
            }
            ErrorSeverity::Warning => {
                warn!(status = %status, error = %self.0, "Request rejected");
            }
            ErrorSeverity::Info => {}
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result alias used by route handlers
pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::ValidationErrors;

    #[test]
    fn test_status_mapping() {
        let mut v = ValidationErrors::new();
        v.add("name", "name is required");
        assert_eq!(
            ApiError(ShepherdError::Validation(v)).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError(ShepherdError::MemberNotFound { member_id: 1 }).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(ShepherdError::PermissionDenied("no".to_string())).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError(ShepherdError::RateLimitExceeded).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError(ShepherdError::GroupFull { group_id: 1 }).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_validation_body_carries_fields() {
        let mut v = ValidationErrors::new();
        v.add("email", "email is not a valid email address");
        let body = ApiError(ShepherdError::Validation(v)).body();
        let details = body.details.unwrap();
        assert_eq!(details["errors"][0]["field"], "email");
    }

    #[test]
    fn test_internal_error_does_not_leak() {
        let err = ApiError(ShepherdError::Config("secret path".to_string()));
        let body = err.body();
        assert_eq!(body.message.as_deref(), Some("Internal server error"));
    }
}
