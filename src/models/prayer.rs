//! Prayer request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "prayer_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PrayerCategory {
    Healing,
    Family,
    Guidance,
    Thanksgiving,
    Finances,
    Other,
}

impl std::fmt::Display for PrayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrayerCategory::Healing => write!(f, "healing"),
            PrayerCategory::Family => write!(f, "family"),
            PrayerCategory::Guidance => write!(f, "guidance"),
            PrayerCategory::Thanksgiving => write!(f, "thanksgiving"),
            PrayerCategory::Finances => write!(f, "finances"),
            PrayerCategory::Other => write!(f, "other"),
        }
    }
}

/// Lifecycle of a prayer request. Transitions move forward only
/// (`open -> praying -> answered`); archival is allowed from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "prayer_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PrayerStatus {
    Open,
    Praying,
    Answered,
    Archived,
}

impl PrayerStatus {
    /// Whether moving to `next` is a legal lifecycle step
    pub fn can_transition_to(self, next: PrayerStatus) -> bool {
        use PrayerStatus::*;
        match (self, next) {
            (_, Archived) => true,
            (Open, Praying) | (Open, Answered) => true,
            (Praying, Answered) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for PrayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrayerStatus::Open => write!(f, "open"),
            PrayerStatus::Praying => write!(f, "praying"),
            PrayerStatus::Answered => write!(f, "answered"),
            PrayerStatus::Archived => write!(f, "archived"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PrayerRequest {
    pub id: i64,
    pub church_id: i64,
    /// Absent for anonymous requests
    pub member_id: Option<i64>,
    pub title: String,
    pub details: Option<String>,
    pub category: PrayerCategory,
    pub status: PrayerStatus,
    pub is_confidential: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrayerRequest {
    pub member_id: Option<i64>,
    pub title: String,
    pub details: Option<String>,
    pub category: Option<PrayerCategory>,
    pub is_confidential: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrayerRequest {
    pub title: Option<String>,
    pub details: Option<String>,
    pub category: Option<PrayerCategory>,
    pub is_confidential: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePrayerStatusRequest {
    pub status: PrayerStatus,
}

/// Listing filters for the prayer screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrayerFilter {
    pub search: Option<String>,
    pub status: Option<PrayerStatus>,
    pub category: Option<PrayerCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(PrayerStatus::Open.can_transition_to(PrayerStatus::Praying));
        assert!(PrayerStatus::Open.can_transition_to(PrayerStatus::Answered));
        assert!(PrayerStatus::Praying.can_transition_to(PrayerStatus::Answered));
    }

    #[test]
    fn test_archival_from_any_state() {
        for status in [
            PrayerStatus::Open,
            PrayerStatus::Praying,
            PrayerStatus::Answered,
            PrayerStatus::Archived,
        ] {
            assert!(status.can_transition_to(PrayerStatus::Archived));
        }
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!PrayerStatus::Answered.can_transition_to(PrayerStatus::Open));
        assert!(!PrayerStatus::Praying.can_transition_to(PrayerStatus::Open));
        assert!(!PrayerStatus::Archived.can_transition_to(PrayerStatus::Praying));
    }
}
