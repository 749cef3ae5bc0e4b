//! Goal repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::goal::{
    CreateGoalRequest, Goal, GoalFilter, GoalOwner, GoalPriority, GoalStatus, UpdateGoalRequest,
};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;
use crate::utils::helpers::escape_like_pattern;

const GOAL_COLUMNS: &str = "id, church_id, department_id, group_id, title, description, priority, status, progress, target_date, assignee_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new goal under its owning department or group
    pub async fn create(
        &self,
        church_id: i64,
        owner: GoalOwner,
        request: CreateGoalRequest,
    ) -> Result<Goal, ShepherdError> {
        let (department_id, group_id) = match owner {
            GoalOwner::Department(id) => (Some(id), None),
            GoalOwner::Group(id) => (None, Some(id)),
        };

        let goal = sqlx::query_as::<_, Goal>(
            r#"
            INSERT INTO goals (church_id, department_id, group_id, title, description, priority, target_date, assignee_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, church_id, department_id, group_id, title, description, priority, status, progress, target_date, assignee_id, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(department_id)
        .bind(group_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.priority.unwrap_or(GoalPriority::Medium))
        .bind(request.target_date)
        .bind(request.assignee_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(goal)
    }

    /// Find goal by ID within a church
    pub async fn find_by_id(&self, church_id: i64, id: i64) -> Result<Option<Goal>, ShepherdError> {
        let goal = sqlx::query_as::<_, Goal>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    /// Update goal; absent fields keep their stored values
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateGoalRequest,
    ) -> Result<Option<Goal>, ShepherdError> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            UPDATE goals
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                priority = COALESCE($5, priority),
                status = COALESCE($6, status),
                progress = COALESCE($7, progress),
                target_date = COALESCE($8, target_date),
                assignee_id = COALESCE($9, assignee_id),
                updated_at = $10
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, department_id, group_id, title, description, priority, status, progress, target_date, assignee_id, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.priority)
        .bind(request.status)
        .bind(request.progress)
        .bind(request.target_date)
        .bind(request.assignee_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    /// Delete goal; reports whether a row was actually removed
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM goals WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List goals of a department or group with filters and pagination
    pub async fn list_for_owner(
        &self,
        church_id: i64,
        owner: GoalOwner,
        filter: &GoalFilter,
        pagination: Pagination,
    ) -> Result<Vec<Goal>, ShepherdError> {
        let (department_id, group_id) = match owner {
            GoalOwner::Department(id) => (Some(id), None),
            GoalOwner::Group(id) => (None, Some(id)),
        };
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let goals = sqlx::query_as::<_, Goal>(&format!(
            r#"
            SELECT {GOAL_COLUMNS} FROM goals
            WHERE church_id = $1
              AND ($2::bigint IS NULL OR department_id = $2)
              AND ($3::bigint IS NULL OR group_id = $3)
              AND ($4::text IS NULL OR title ILIKE $4 OR description ILIKE $4)
              AND ($5::goal_status IS NULL OR status = $5)
              AND ($6::goal_priority IS NULL OR priority = $6)
            ORDER BY priority DESC, target_date ASC NULLS LAST
            LIMIT $7 OFFSET $8
            "#
        ))
        .bind(church_id)
        .bind(department_id)
        .bind(group_id)
        .bind(pattern)
        .bind(filter.status)
        .bind(filter.priority)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    /// Count goals matching the same filter as `list_for_owner`
    pub async fn count_for_owner(
        &self,
        church_id: i64,
        owner: GoalOwner,
        filter: &GoalFilter,
    ) -> Result<i64, ShepherdError> {
        let (department_id, group_id) = match owner {
            GoalOwner::Department(id) => (Some(id), None),
            GoalOwner::Group(id) => (None, Some(id)),
        };
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM goals
            WHERE church_id = $1
              AND ($2::bigint IS NULL OR department_id = $2)
              AND ($3::bigint IS NULL OR group_id = $3)
              AND ($4::text IS NULL OR title ILIKE $4 OR description ILIKE $4)
              AND ($5::goal_status IS NULL OR status = $5)
              AND ($6::goal_priority IS NULL OR priority = $6)
            "#,
        )
        .bind(church_id)
        .bind(department_id)
        .bind(group_id)
        .bind(pattern)
        .bind(filter.status)
        .bind(filter.priority)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Average progress across all goals of a church
    pub async fn average_progress(&self, church_id: i64) -> Result<i32, ShepherdError> {
        let avg: (Option<f64>,) =
            sqlx::query_as("SELECT AVG(progress)::float8 FROM goals WHERE church_id = $1")
                .bind(church_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(avg.0.map(|v| v.round() as i32).unwrap_or(0))
    }

    /// Average progress across a department's goals
    pub async fn average_progress_for_department(
        &self,
        department_id: i64,
    ) -> Result<i32, ShepherdError> {
        let avg: (Option<f64>,) =
            sqlx::query_as("SELECT AVG(progress)::float8 FROM goals WHERE department_id = $1")
                .bind(department_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(avg.0.map(|v| v.round() as i32).unwrap_or(0))
    }

    /// Count a department's goals, total and completed
    pub async fn department_goal_counts(
        &self,
        department_id: i64,
    ) -> Result<(i64, i64), ShepherdError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'completed')
            FROM goals WHERE department_id = $1
            "#,
        )
        .bind(department_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Count goals in a given status across a church
    pub async fn count_by_status(
        &self,
        church_id: i64,
        status: GoalStatus,
    ) -> Result<i64, ShepherdError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM goals WHERE church_id = $1 AND status = $2")
                .bind(church_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
