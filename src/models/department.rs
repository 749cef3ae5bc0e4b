//! Department model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: i64,
    pub church_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<i64>,
    /// Budget figures are stored in cents
    pub budget_allocated: i64,
    pub budget_used: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Percent of the allocated budget already spent
    pub fn budget_percent_used(&self) -> i32 {
        crate::utils::helpers::percent_used(self.budget_used, self.budget_allocated)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DepartmentMember {
    pub id: i64,
    pub department_id: i64,
    pub member_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<i64>,
    pub budget_allocated: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub leader_id: Option<i64>,
    pub budget_allocated: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDepartmentMemberRequest {
    pub member_id: i64,
    pub role: Option<String>,
}

/// A spend recorded against the department budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordExpenseRequest {
    pub amount: i64,
}

/// Aggregates for a single department card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentStats {
    pub department_id: i64,
    pub member_count: i64,
    pub goal_count: i64,
    pub completed_goal_count: i64,
    pub average_goal_progress: i32,
    pub budget_percent_used: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn department(allocated: i64, used: i64) -> Department {
        Department {
            id: 1,
            church_id: 1,
            name: "Worship".to_string(),
            description: None,
            leader_id: None,
            budget_allocated: allocated,
            budget_used: used,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_budget_percent_used() {
        assert_eq!(department(25000, 18500).budget_percent_used(), 74);
        assert_eq!(department(0, 0).budget_percent_used(), 0);
    }
}
