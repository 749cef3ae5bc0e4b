//! Department service implementation
//!
//! This service handles ministry departments: profile management, budget
//! tracking, and membership.

use tracing::{debug, info, warn};

use crate::database::DatabaseService;
use crate::models::department::{
    AddDepartmentMemberRequest, CreateDepartmentRequest, Department, DepartmentMember,
    DepartmentStats, RecordExpenseRequest, UpdateDepartmentRequest,
};
use crate::models::{Paged, Pagination};
use crate::services::normalize_listing;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::helpers::percent_used;
use crate::utils::validation::ValidationErrors;

/// Department service for ministry operations
#[derive(Clone)]
pub struct DepartmentService {
    db: DatabaseService,
}

impl DepartmentService {
    /// Create a new DepartmentService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// List departments with search and pagination
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<String>,
        pagination: Pagination,
    ) -> Result<Paged<Department>> {
        let search = normalize_listing(&pagination, search)?;
        debug!(church_id = church_id, page = pagination.page, "Listing departments");

        let (items, total) = futures::try_join!(
            self.db
                .departments
                .list(church_id, search.as_deref(), pagination),
            self.db.departments.count(church_id, search.as_deref()),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Get a single department by ID
    pub async fn get(&self, church_id: i64, department_id: i64) -> Result<Department> {
        self.db
            .departments
            .find_by_id(church_id, department_id)
            .await?
            .ok_or(ShepherdError::DepartmentNotFound { department_id })
    }

    /// Create a department
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateDepartmentRequest,
    ) -> Result<Department> {
        let mut v = ValidationErrors::new();
        v.require("name", &request.name);
        v.max_length("name", &request.name, 150);
        if let Some(allocated) = request.budget_allocated {
            v.non_negative("budget_allocated", allocated);
        }
        v.into_result()?;

        if let Some(leader_id) = request.leader_id {
            if self.db.members.find_by_id(church_id, leader_id).await?.is_none() {
                return Err(ShepherdError::MemberNotFound { member_id: leader_id });
            }
        }

        let department = self.db.departments.create(church_id, request).await?;
        info!(church_id = church_id, department_id = department.id, "Department created");

        Ok(department)
    }

    /// Update a department. A reduced allocation may never undercut what has
    /// already been spent.
    pub async fn update(
        &self,
        church_id: i64,
        department_id: i64,
        request: UpdateDepartmentRequest,
    ) -> Result<Department> {
        let mut v = ValidationErrors::new();
        if let Some(ref name) = request.name {
            v.require("name", name);
            v.max_length("name", name, 150);
        }
        if let Some(allocated) = request.budget_allocated {
            v.non_negative("budget_allocated", allocated);
        }
        v.into_result()?;

        if let Some(allocated) = request.budget_allocated {
            let current = self.get(church_id, department_id).await?;
            if allocated < current.budget_used {
                warn!(
                    department_id = department_id,
                    allocated = allocated,
                    used = current.budget_used,
                    "Rejected allocation below spent budget"
                );
                return Err(ShepherdError::BudgetExceeded { department_id });
            }
        }

        let department = self
            .db
            .departments
            .update(church_id, department_id, request)
            .await?
            .ok_or(ShepherdError::DepartmentNotFound { department_id })?;

        info!(church_id = church_id, department_id = department_id, "Department updated");
        Ok(department)
    }

    /// Delete a department
    pub async fn delete(&self, church_id: i64, department_id: i64) -> Result<()> {
        let removed = self.db.departments.delete(church_id, department_id).await?;
        if !removed {
            return Err(ShepherdError::DepartmentNotFound { department_id });
        }

        info!(church_id = church_id, department_id = department_id, "Department deleted");
        Ok(())
    }

    /// Record a spend against the department budget
    pub async fn record_expense(
        &self,
        church_id: i64,
        department_id: i64,
        request: RecordExpenseRequest,
    ) -> Result<Department> {
        let mut v = ValidationErrors::new();
        v.positive("amount", request.amount);
        v.into_result()?;

        match self
            .db
            .departments
            .record_expense(church_id, department_id, request.amount)
            .await?
        {
            Some(department) => {
                info!(
                    department_id = department_id,
                    amount = request.amount,
                    used = department.budget_used,
                    "Expense recorded"
                );
                Ok(department)
            }
            // The guarded update matches nothing either when the department
            // is missing or when the spend would overrun the allocation.
            None => {
                self.get(church_id, department_id).await?;
                Err(ShepherdError::BudgetExceeded { department_id })
            }
        }
    }

    /// Add a member to the department
    pub async fn add_member(
        &self,
        church_id: i64,
        department_id: i64,
        request: AddDepartmentMemberRequest,
    ) -> Result<DepartmentMember> {
        let member = self
            .db
            .add_department_member(church_id, department_id, request)
            .await?;

        info!(
            department_id = department_id,
            member_id = member.member_id,
            "Member added to department"
        );
        Ok(member)
    }

    /// Remove a member from the department
    pub async fn remove_member(
        &self,
        church_id: i64,
        department_id: i64,
        member_id: i64,
    ) -> Result<()> {
        // Scope check before touching the join table
        self.get(church_id, department_id).await?;

        let removed = self
            .db
            .departments
            .remove_member(department_id, member_id)
            .await?;
        if !removed {
            return Err(ShepherdError::InvalidInput(
                "Member does not belong to this department".to_string(),
            ));
        }

        info!(
            department_id = department_id,
            member_id = member_id,
            "Member removed from department"
        );
        Ok(())
    }

    /// Department members
    pub async fn members(
        &self,
        church_id: i64,
        department_id: i64,
    ) -> Result<Vec<DepartmentMember>> {
        self.get(church_id, department_id).await?;
        self.db.departments.get_members(department_id).await
    }

    /// Aggregates for one department card
    pub async fn stats(&self, church_id: i64, department_id: i64) -> Result<DepartmentStats> {
        let department = self.get(church_id, department_id).await?;

        let (member_count, (goal_count, completed_goal_count), average_goal_progress) = futures::try_join!(
            self.db.departments.member_count(department_id),
            self.db.goals.department_goal_counts(department_id),
            self.db.goals.average_progress_for_department(department_id),
        )?;

        Ok(DepartmentStats {
            department_id,
            member_count,
            goal_count,
            completed_goal_count,
            average_goal_progress,
            budget_percent_used: percent_used(department.budget_used, department.budget_allocated),
        })
    }
}
