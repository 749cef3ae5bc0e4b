//! Administrator account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of an administrative account within its church
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "admin_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Staff,
    DepartmentLead,
    ChurchAdmin,
    SuperAdmin,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::Staff => write!(f, "staff"),
            AdminRole::DepartmentLead => write!(f, "department_lead"),
            AdminRole::ChurchAdmin => write!(f, "church_admin"),
            AdminRole::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: i64,
    pub church_id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    pub email: String,
    pub full_name: String,
    pub role: Option<AdminRole>,
    /// When absent, a temporary password is generated and returned once
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdminRequest {
    pub full_name: Option<String>,
    pub role: Option<AdminRole>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub admin_id: i64,
    pub church_id: i64,
    pub role: AdminRole,
}

/// Result of creating an admin with a generated password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreated {
    pub admin: Admin,
    pub temporary_password: Option<String>,
}
