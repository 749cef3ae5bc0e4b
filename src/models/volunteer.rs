//! Volunteer model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "volunteer_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VolunteerStatus {
    Pending,
    Active,
    Inactive,
}

impl std::fmt::Display for VolunteerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolunteerStatus::Pending => write!(f, "pending"),
            VolunteerStatus::Active => write!(f, "active"),
            VolunteerStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Volunteer {
    pub id: i64,
    pub church_id: i64,
    pub member_id: i64,
    pub department_id: i64,
    pub role_title: String,
    pub status: VolunteerStatus,
    pub availability: Option<String>,
    pub background_check_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVolunteerRequest {
    pub member_id: i64,
    pub department_id: i64,
    pub role_title: String,
    pub availability: Option<String>,
    pub background_check_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVolunteerRequest {
    pub department_id: Option<i64>,
    pub role_title: Option<String>,
    pub status: Option<VolunteerStatus>,
    pub availability: Option<String>,
    pub background_check_on: Option<NaiveDate>,
}

/// Listing filters for the volunteers screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerFilter {
    pub search: Option<String>,
    pub status: Option<VolunteerStatus>,
    pub department_id: Option<i64>,
}
