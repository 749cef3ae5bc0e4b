//! Department repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::department::{
    AddDepartmentMemberRequest, CreateDepartmentRequest, Department, DepartmentMember,
    UpdateDepartmentRequest,
};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;
use crate::utils::helpers::escape_like_pattern;

const DEPARTMENT_COLUMNS: &str = "id, church_id, name, description, leader_id, budget_allocated, budget_used, is_active, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new department
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateDepartmentRequest,
    ) -> Result<Department, ShepherdError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (church_id, name, description, leader_id, budget_allocated, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, church_id, name, description, leader_id, budget_allocated, budget_used, is_active, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.leader_id)
        .bind(request.budget_allocated.unwrap_or(0))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(department)
    }

    /// Find department by ID within a church
    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Department>, ShepherdError> {
        let department = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    /// Update department; absent fields keep their stored values
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateDepartmentRequest,
    ) -> Result<Option<Department>, ShepherdError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                leader_id = COALESCE($5, leader_id),
                budget_allocated = COALESCE($6, budget_allocated),
                is_active = COALESCE($7, is_active),
                updated_at = $8
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, name, description, leader_id, budget_allocated, budget_used, is_active, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.leader_id)
        .bind(request.budget_allocated)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    /// Record spend against the budget. The guard in the WHERE clause keeps
    /// `budget_used <= budget_allocated`; no row comes back when the spend
    /// would overrun the allocation.
    pub async fn record_expense(
        &self,
        church_id: i64,
        id: i64,
        amount: i64,
    ) -> Result<Option<Department>, ShepherdError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET budget_used = budget_used + $3, updated_at = $4
            WHERE church_id = $1 AND id = $2 AND budget_used + $3 <= budget_allocated
            RETURNING id, church_id, name, description, leader_id, budget_allocated, budget_used, is_active, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(amount)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    /// Delete department; reports whether a row was actually removed
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM departments WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List departments with search and pagination
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<Department>, ShepherdError> {
        let pattern = search.map(|s| format!("%{}%", escape_like_pattern(s)));

        let departments = sqlx::query_as::<_, Department>(&format!(
            r#"
            SELECT {DEPARTMENT_COLUMNS} FROM departments
            WHERE church_id = $1
              AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2)
            ORDER BY name ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(pattern)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    /// Count departments matching the same filter as `list`
    pub async fn count(&self, church_id: i64, search: Option<&str>) -> Result<i64, ShepherdError> {
        let pattern = search.map(|s| format!("%{}%", escape_like_pattern(s)));

        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM departments
            WHERE church_id = $1
              AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2)
            "#,
        )
        .bind(church_id)
        .bind(pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Add member to department
    pub async fn add_member(
        &self,
        department_id: i64,
        request: AddDepartmentMemberRequest,
    ) -> Result<DepartmentMember, ShepherdError> {
        let member = sqlx::query_as::<_, DepartmentMember>(
            r#"
            INSERT INTO department_members (department_id, member_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, department_id, member_id, role, joined_at
            "#,
        )
        .bind(department_id)
        .bind(request.member_id)
        .bind(request.role.unwrap_or_else(|| "member".to_string()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Remove member from department
    pub async fn remove_member(
        &self,
        department_id: i64,
        member_id: i64,
    ) -> Result<bool, ShepherdError> {
        let result = sqlx::query(
            "DELETE FROM department_members WHERE department_id = $1 AND member_id = $2",
        )
        .bind(department_id)
        .bind(member_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get department members
    pub async fn get_members(
        &self,
        department_id: i64,
    ) -> Result<Vec<DepartmentMember>, ShepherdError> {
        let members = sqlx::query_as::<_, DepartmentMember>(
            "SELECT id, department_id, member_id, role, joined_at FROM department_members WHERE department_id = $1 ORDER BY joined_at ASC",
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Check if member belongs to department
    pub async fn is_member(&self, department_id: i64, member_id: i64) -> Result<bool, ShepherdError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM department_members WHERE department_id = $1 AND member_id = $2",
        )
        .bind(department_id)
        .bind(member_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Count members in a department
    pub async fn member_count(&self, department_id: i64) -> Result<i64, ShepherdError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM department_members WHERE department_id = $1")
                .bind(department_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Count all departments of a church
    pub async fn count_all(&self, church_id: i64) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM departments WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
