//! Discipleship models
//!
//! Mentors shepherd disciples through a staged program; a mentor carries at
//! most `capacity` active disciples at a time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "discipleship_stage", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DiscipleshipStage {
    NewBeliever,
    Foundations,
    Growing,
    Maturity,
    Multiplying,
}

impl std::fmt::Display for DiscipleshipStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscipleshipStage::NewBeliever => write!(f, "new_believer"),
            DiscipleshipStage::Foundations => write!(f, "foundations"),
            DiscipleshipStage::Growing => write!(f, "growing"),
            DiscipleshipStage::Maturity => write!(f, "maturity"),
            DiscipleshipStage::Multiplying => write!(f, "multiplying"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "disciple_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DiscipleStatus {
    Active,
    Paused,
    Completed,
    Dropped,
}

impl std::fmt::Display for DiscipleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscipleStatus::Active => write!(f, "active"),
            DiscipleStatus::Paused => write!(f, "paused"),
            DiscipleStatus::Completed => write!(f, "completed"),
            DiscipleStatus::Dropped => write!(f, "dropped"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mentor {
    pub id: i64,
    pub church_id: i64,
    pub member_id: i64,
    pub focus_area: Option<String>,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Disciple {
    pub id: i64,
    pub church_id: i64,
    pub member_id: i64,
    pub mentor_id: Option<i64>,
    pub stage: DiscipleshipStage,
    pub progress: i32,
    pub status: DiscipleStatus,
    pub started_on: Option<NaiveDate>,
    pub completed_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMentorRequest {
    pub member_id: i64,
    pub focus_area: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMentorRequest {
    pub focus_area: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiscipleRequest {
    pub member_id: i64,
    pub mentor_id: Option<i64>,
    pub stage: Option<DiscipleshipStage>,
    pub started_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDiscipleRequest {
    pub mentor_id: Option<i64>,
    pub stage: Option<DiscipleshipStage>,
    pub progress: Option<i32>,
    pub status: Option<DiscipleStatus>,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignMentorRequest {
    pub mentor_id: i64,
}
