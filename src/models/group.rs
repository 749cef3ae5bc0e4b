//! Small group model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SmallGroup {
    pub id: i64,
    pub church_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<i64>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub max_capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupMember {
    pub id: i64,
    pub group_id: i64,
    pub member_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Group row plus its current member count, for the listing screen
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupWithOccupancy {
    pub id: i64,
    pub church_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<i64>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub max_capacity: i32,
    pub is_active: bool,
    pub current_members: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupWithOccupancy {
    /// Percent of seats taken, clamped for display
    pub fn occupancy_percent(&self) -> i32 {
        crate::utils::helpers::percent_used(self.current_members, self.max_capacity as i64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<i64>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub max_capacity: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub leader_id: Option<i64>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub max_capacity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGroupRequest {
    pub member_id: i64,
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn group(current: i64, max: i32) -> GroupWithOccupancy {
        GroupWithOccupancy {
            id: 1,
            church_id: 1,
            name: "Young Adults".to_string(),
            description: None,
            leader_id: None,
            meeting_day: Some("Friday".to_string()),
            meeting_time: Some("19:00".to_string()),
            location: None,
            max_capacity: max,
            is_active: true,
            current_members: current,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_occupancy_percent() {
        assert_eq!(group(9, 12).occupancy_percent(), 75);
        assert_eq!(group(12, 12).occupancy_percent(), 100);
        assert_eq!(group(0, 12).occupancy_percent(), 0);
    }
}
