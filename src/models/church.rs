//! Church (tenant) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Church {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: String,
    pub settings: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for the public church registration endpoint. Registration creates
/// the tenant together with its first administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterChurchRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: Option<String>,
    pub admin_full_name: String,
    pub admin_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateChurchRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: Option<String>,
}

/// Free-form tenant preferences blob managed from the settings screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateChurchSettingsRequest {
    pub settings: serde_json::Value,
}

/// Result of a successful registration, returned exactly once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurchRegistration {
    pub church: Church,
    pub admin_email: String,
    pub temporary_password: String,
}
