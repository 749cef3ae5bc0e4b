//! Error handling for Shepherd
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

use crate::utils::validation::ValidationErrors;

/// Main error type for the Shepherd application
#[derive(Error, Debug)]
pub enum ShepherdError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Delivery gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Church not found: {church_id}")]
    ChurchNotFound { church_id: i64 },

    #[error("Member not found: {member_id}")]
    MemberNotFound { member_id: i64 },

    #[error("Department not found: {department_id}")]
    DepartmentNotFound { department_id: i64 },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: i64 },

    #[error("Goal not found: {goal_id}")]
    GoalNotFound { goal_id: i64 },

    #[error("Prayer request not found: {request_id}")]
    PrayerRequestNotFound { request_id: i64 },

    #[error("Volunteer not found: {volunteer_id}")]
    VolunteerNotFound { volunteer_id: i64 },

    #[error("Group {group_id} has reached maximum capacity")]
    GroupFull { group_id: i64 },

    #[error("Mentor {mentor_id} has reached disciple capacity")]
    MentorAtCapacity { mentor_id: i64 },

    #[error("Budget exceeded for department {department_id}")]
    BudgetExceeded { department_id: i64 },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Delivery gateway specific errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    RequestFailed(String),

    #[error("Gateway timeout")]
    Timeout,

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("Gateway disabled or unavailable")]
    ServiceUnavailable,
}

/// Result type alias for Shepherd operations
pub type Result<T> = std::result::Result<T, ShepherdError>;

/// Result type alias for gateway operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl ShepherdError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ShepherdError::Database(_) => false,
            ShepherdError::Migration(_) => false,
            ShepherdError::Gateway(_) => true,
            ShepherdError::Config(_) => false,
            ShepherdError::PermissionDenied(_) => false,
            ShepherdError::ChurchNotFound { .. } => false,
            ShepherdError::MemberNotFound { .. } => false,
            ShepherdError::DepartmentNotFound { .. } => false,
            ShepherdError::GroupNotFound { .. } => false,
            ShepherdError::GoalNotFound { .. } => false,
            ShepherdError::PrayerRequestNotFound { .. } => false,
            ShepherdError::VolunteerNotFound { .. } => false,
            ShepherdError::GroupFull { .. } => false,
            ShepherdError::MentorAtCapacity { .. } => false,
            ShepherdError::BudgetExceeded { .. } => false,
            ShepherdError::InvalidStatusTransition { .. } => false,
            ShepherdError::Validation(_) => false,
            ShepherdError::Redis(_) => true,
            ShepherdError::Http(_) => true,
            ShepherdError::Serialization(_) => false,
            ShepherdError::Io(_) => true,
            ShepherdError::UrlParse(_) => false,
            ShepherdError::Token(_) => false,
            ShepherdError::Authentication(_) => false,
            ShepherdError::RateLimitExceeded => true,
            ShepherdError::InvalidInput(_) => false,
            ShepherdError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ShepherdError::Database(_) => ErrorSeverity::Critical,
            ShepherdError::Migration(_) => ErrorSeverity::Critical,
            ShepherdError::Config(_) => ErrorSeverity::Critical,
            ShepherdError::PermissionDenied(_) => ErrorSeverity::Warning,
            ShepherdError::Authentication(_) => ErrorSeverity::Warning,
            ShepherdError::Token(_) => ErrorSeverity::Warning,
            ShepherdError::RateLimitExceeded => ErrorSeverity::Warning,
            ShepherdError::Validation(_) => ErrorSeverity::Info,
            ShepherdError::InvalidInput(_) => ErrorSeverity::Info,
            ShepherdError::InvalidStatusTransition { .. } => ErrorSeverity::Info,
            ShepherdError::GroupFull { .. } => ErrorSeverity::Info,
            ShepherdError::MentorAtCapacity { .. } => ErrorSeverity::Info,
            ShepherdError::BudgetExceeded { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_recoverable() {
        let err = ShepherdError::MemberNotFound { member_id: 7 };
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_capacity_errors_are_info() {
        assert_eq!(
            ShepherdError::GroupFull { group_id: 1 }.severity(),
            ErrorSeverity::Info
        );
        assert_eq!(
            ShepherdError::BudgetExceeded { department_id: 2 }.severity(),
            ErrorSeverity::Info
        );
    }

    #[test]
    fn test_gateway_errors_are_recoverable() {
        let err = ShepherdError::Gateway(GatewayError::Timeout);
        assert!(err.is_recoverable());
    }
}
