//! Volunteer repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::volunteer::{
    CreateVolunteerRequest, UpdateVolunteerRequest, Volunteer, VolunteerFilter, VolunteerStatus,
};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;
use crate::utils::helpers::escape_like_pattern;

const VOLUNTEER_COLUMNS: &str = "id, church_id, member_id, department_id, role_title, status, availability, background_check_on, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct VolunteerRepository {
    pool: PgPool,
}

impl VolunteerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new volunteer record
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateVolunteerRequest,
    ) -> Result<Volunteer, ShepherdError> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            INSERT INTO volunteers (church_id, member_id, department_id, role_title, availability, background_check_on, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, church_id, member_id, department_id, role_title, status, availability, background_check_on, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(request.member_id)
        .bind(request.department_id)
        .bind(request.role_title)
        .bind(request.availability)
        .bind(request.background_check_on)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(volunteer)
    }

    /// Find volunteer by ID within a church
    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Volunteer>, ShepherdError> {
        let volunteer = sqlx::query_as::<_, Volunteer>(&format!(
            "SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(volunteer)
    }

    /// Update volunteer; absent fields keep their stored values
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateVolunteerRequest,
    ) -> Result<Option<Volunteer>, ShepherdError> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            UPDATE volunteers
            SET department_id = COALESCE($3, department_id),
                role_title = COALESCE($4, role_title),
                status = COALESCE($5, status),
                availability = COALESCE($6, availability),
                background_check_on = COALESCE($7, background_check_on),
                updated_at = $8
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, member_id, department_id, role_title, status, availability, background_check_on, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.department_id)
        .bind(request.role_title)
        .bind(request.status)
        .bind(request.availability)
        .bind(request.background_check_on)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(volunteer)
    }

    /// Delete volunteer; reports whether a row was actually removed
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM volunteers WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List volunteers with search and filters
    pub async fn list(
        &self,
        church_id: i64,
        filter: &VolunteerFilter,
        pagination: Pagination,
    ) -> Result<Vec<Volunteer>, ShepherdError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let volunteers = sqlx::query_as::<_, Volunteer>(&format!(
            r#"
            SELECT {VOLUNTEER_COLUMNS} FROM volunteers
            WHERE church_id = $1
              AND ($2::text IS NULL OR role_title ILIKE $2)
              AND ($3::volunteer_status IS NULL OR status = $3)
              AND ($4::bigint IS NULL OR department_id = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(church_id)
        .bind(pattern)
        .bind(filter.status)
        .bind(filter.department_id)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(volunteers)
    }

    /// Count volunteers matching the same filter as `list`
    pub async fn count(
        &self,
        church_id: i64,
        filter: &VolunteerFilter,
    ) -> Result<i64, ShepherdError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM volunteers
            WHERE church_id = $1
              AND ($2::text IS NULL OR role_title ILIKE $2)
              AND ($3::volunteer_status IS NULL OR status = $3)
              AND ($4::bigint IS NULL OR department_id = $4)
            "#,
        )
        .bind(church_id)
        .bind(pattern)
        .bind(filter.status)
        .bind(filter.department_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count volunteers in a given status
    pub async fn count_by_status(
        &self,
        church_id: i64,
        status: VolunteerStatus,
    ) -> Result<i64, ShepherdError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM volunteers WHERE church_id = $1 AND status = $2")
                .bind(church_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Member ids of active volunteers, for audience selection
    pub async fn active_member_ids(&self, church_id: i64) -> Result<Vec<i64>, ShepherdError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT member_id FROM volunteers WHERE church_id = $1 AND status = 'active'",
        )
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
