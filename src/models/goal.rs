//! Goal model
//!
//! Goals are tracked objectives owned by either a department or a small
//! group, with a priority, target date, and assignee.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "goal_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalPriority::Low => write!(f, "low"),
            GoalPriority::Medium => write!(f, "medium"),
            GoalPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "goal_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::Planned => write!(f, "planned"),
            GoalStatus::InProgress => write!(f, "in_progress"),
            GoalStatus::Completed => write!(f, "completed"),
            GoalStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Owner of a goal: exactly one of department or group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOwner {
    Department(i64),
    Group(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: i64,
    pub church_id: i64,
    pub department_id: Option<i64>,
    pub group_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub priority: GoalPriority,
    pub status: GoalStatus,
    pub progress: i32,
    pub target_date: Option<NaiveDate>,
    pub assignee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<GoalPriority>,
    pub target_date: Option<NaiveDate>,
    pub assignee_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<GoalPriority>,
    pub status: Option<GoalStatus>,
    pub progress: Option<i32>,
    pub target_date: Option<NaiveDate>,
    pub assignee_id: Option<i64>,
}

/// Listing filters for goal screens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalFilter {
    pub search: Option<String>,
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
}
