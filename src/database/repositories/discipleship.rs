//! Discipleship repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::discipleship::{
    CreateDiscipleRequest, CreateMentorRequest, Disciple, DiscipleStatus, DiscipleshipStage,
    Mentor, UpdateDiscipleRequest, UpdateMentorRequest,
};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;

const MENTOR_COLUMNS: &str =
    "id, church_id, member_id, focus_area, capacity, is_active, created_at, updated_at";
const DISCIPLE_COLUMNS: &str = "id, church_id, member_id, mentor_id, stage, progress, status, started_on, completed_on, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct DiscipleshipRepository {
    pool: PgPool,
}

impl DiscipleshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a member as a mentor
    pub async fn create_mentor(
        &self,
        church_id: i64,
        request: CreateMentorRequest,
    ) -> Result<Mentor, ShepherdError> {
        let mentor = sqlx::query_as::<_, Mentor>(
            r#"
            INSERT INTO mentors (church_id, member_id, focus_area, capacity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, church_id, member_id, focus_area, capacity, is_active, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(request.member_id)
        .bind(request.focus_area)
        .bind(request.capacity.unwrap_or(3))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(mentor)
    }

    /// Find mentor by ID within a church
    pub async fn find_mentor(&self, church_id: i64, id: i64) -> Result<Option<Mentor>, ShepherdError> {
        let mentor = sqlx::query_as::<_, Mentor>(&format!(
            "SELECT {MENTOR_COLUMNS} FROM mentors WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mentor)
    }

    /// Update mentor; absent fields keep their stored values
    pub async fn update_mentor(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateMentorRequest,
    ) -> Result<Option<Mentor>, ShepherdError> {
        let mentor = sqlx::query_as::<_, Mentor>(
            r#"
            UPDATE mentors
            SET focus_area = COALESCE($3, focus_area),
                capacity = COALESCE($4, capacity),
                is_active = COALESCE($5, is_active),
                updated_at = $6
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, member_id, focus_area, capacity, is_active, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.focus_area)
        .bind(request.capacity)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(mentor)
    }

    /// List mentors for a church
    pub async fn list_mentors(
        &self,
        church_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<Mentor>, ShepherdError> {
        let mentors = sqlx::query_as::<_, Mentor>(&format!(
            "SELECT {MENTOR_COLUMNS} FROM mentors WHERE church_id = $1 ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        ))
        .bind(church_id)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(mentors)
    }

    /// Count mentors for a church
    pub async fn count_mentors(&self, church_id: i64) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mentors WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Number of active disciples currently assigned to a mentor
    pub async fn mentor_load(&self, mentor_id: i64) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM disciples WHERE mentor_id = $1 AND status = 'active'",
        )
        .bind(mentor_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Enroll a member as a disciple
    pub async fn create_disciple(
        &self,
        church_id: i64,
        request: CreateDiscipleRequest,
    ) -> Result<Disciple, ShepherdError> {
        let disciple = sqlx::query_as::<_, Disciple>(
            r#"
            INSERT INTO disciples (church_id, member_id, mentor_id, stage, started_on, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, church_id, member_id, mentor_id, stage, progress, status, started_on, completed_on, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(request.member_id)
        .bind(request.mentor_id)
        .bind(request.stage.unwrap_or(DiscipleshipStage::NewBeliever))
        .bind(request.started_on)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(disciple)
    }

    /// Find disciple by ID within a church
    pub async fn find_disciple(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Disciple>, ShepherdError> {
        let disciple = sqlx::query_as::<_, Disciple>(&format!(
            "SELECT {DISCIPLE_COLUMNS} FROM disciples WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(disciple)
    }

    /// Update disciple; absent fields keep their stored values
    pub async fn update_disciple(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateDiscipleRequest,
    ) -> Result<Option<Disciple>, ShepherdError> {
        let disciple = sqlx::query_as::<_, Disciple>(
            r#"
            UPDATE disciples
            SET mentor_id = COALESCE($3, mentor_id),
                stage = COALESCE($4, stage),
                progress = COALESCE($5, progress),
                status = COALESCE($6, status),
                completed_on = COALESCE($7, completed_on),
                updated_at = $8
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, member_id, mentor_id, stage, progress, status, started_on, completed_on, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.mentor_id)
        .bind(request.stage)
        .bind(request.progress)
        .bind(request.status)
        .bind(request.completed_on)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(disciple)
    }

    /// Delete disciple; reports whether a row was actually removed
    pub async fn delete_disciple(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM disciples WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List disciples, optionally narrowed to a mentor or status
    pub async fn list_disciples(
        &self,
        church_id: i64,
        mentor_id: Option<i64>,
        status: Option<DiscipleStatus>,
        pagination: Pagination,
    ) -> Result<Vec<Disciple>, ShepherdError> {
        let disciples = sqlx::query_as::<_, Disciple>(&format!(
            r#"
            SELECT {DISCIPLE_COLUMNS} FROM disciples
            WHERE church_id = $1
              AND ($2::bigint IS NULL OR mentor_id = $2)
              AND ($3::disciple_status IS NULL OR status = $3)
            ORDER BY created_at ASC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(church_id)
        .bind(mentor_id)
        .bind(status)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(disciples)
    }

    /// Count disciples matching the same filter as `list_disciples`
    pub async fn count_disciples(
        &self,
        church_id: i64,
        mentor_id: Option<i64>,
        status: Option<DiscipleStatus>,
    ) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM disciples
            WHERE church_id = $1
              AND ($2::bigint IS NULL OR mentor_id = $2)
              AND ($3::disciple_status IS NULL OR status = $3)
            "#,
        )
        .bind(church_id)
        .bind(mentor_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Average progress across a church's active disciples
    pub async fn average_disciple_progress(&self, church_id: i64) -> Result<i32, ShepherdError> {
        let avg: (Option<f64>,) = sqlx::query_as(
            "SELECT AVG(progress)::float8 FROM disciples WHERE church_id = $1 AND status = 'active'",
        )
        .bind(church_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(avg.0.map(|v| v.round() as i32).unwrap_or(0))
    }
}
