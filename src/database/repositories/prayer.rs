//! Prayer request repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::prayer::{
    CreatePrayerRequest, PrayerCategory, PrayerFilter, PrayerRequest, PrayerStatus,
    UpdatePrayerRequest,
};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;
use crate::utils::helpers::escape_like_pattern;

const PRAYER_COLUMNS: &str = "id, church_id, member_id, title, details, category, status, is_confidential, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PrayerRepository {
    pool: PgPool,
}

impl PrayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new prayer request
    pub async fn create(
        &self,
        church_id: i64,
        request: CreatePrayerRequest,
    ) -> Result<PrayerRequest, ShepherdError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(
            r#"
            INSERT INTO prayer_requests (church_id, member_id, title, details, category, is_confidential, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, church_id, member_id, title, details, category, status, is_confidential, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(request.member_id)
        .bind(request.title)
        .bind(request.details)
        .bind(request.category.unwrap_or(PrayerCategory::Other))
        .bind(request.is_confidential.unwrap_or(false))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prayer)
    }

    /// Find prayer request by ID within a church
    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<PrayerRequest>, ShepherdError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(&format!(
            "SELECT {PRAYER_COLUMNS} FROM prayer_requests WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prayer)
    }

    /// Update prayer request content; absent fields keep their stored values
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdatePrayerRequest,
    ) -> Result<Option<PrayerRequest>, ShepherdError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(
            r#"
            UPDATE prayer_requests
            SET title = COALESCE($3, title),
                details = COALESCE($4, details),
                category = COALESCE($5, category),
                is_confidential = COALESCE($6, is_confidential),
                updated_at = $7
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, member_id, title, details, category, status, is_confidential, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.title)
        .bind(request.details)
        .bind(request.category)
        .bind(request.is_confidential)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(prayer)
    }

    /// Move a prayer request to a new lifecycle status
    pub async fn set_status(
        &self,
        church_id: i64,
        id: i64,
        status: PrayerStatus,
    ) -> Result<Option<PrayerRequest>, ShepherdError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(
            r#"
            UPDATE prayer_requests
            SET status = $3, updated_at = $4
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, member_id, title, details, category, status, is_confidential, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(prayer)
    }

    /// Delete prayer request; reports whether a row was actually removed
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM prayer_requests WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List prayer requests with search, status/category filters, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        filter: &PrayerFilter,
        pagination: Pagination,
    ) -> Result<Vec<PrayerRequest>, ShepherdError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let prayers = sqlx::query_as::<_, PrayerRequest>(&format!(
            r#"
            SELECT {PRAYER_COLUMNS} FROM prayer_requests
            WHERE church_id = $1
              AND ($2::text IS NULL OR title ILIKE $2 OR details ILIKE $2)
              AND ($3::prayer_status IS NULL OR status = $3)
              AND ($4::prayer_category IS NULL OR category = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(church_id)
        .bind(pattern)
        .bind(filter.status)
        .bind(filter.category)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(prayers)
    }

    /// Count prayer requests matching the same filter as `list`
    pub async fn count(&self, church_id: i64, filter: &PrayerFilter) -> Result<i64, ShepherdError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM prayer_requests
            WHERE church_id = $1
              AND ($2::text IS NULL OR title ILIKE $2 OR details ILIKE $2)
              AND ($3::prayer_status IS NULL OR status = $3)
              AND ($4::prayer_category IS NULL OR category = $4)
            "#,
        )
        .bind(church_id)
        .bind(pattern)
        .bind(filter.status)
        .bind(filter.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count prayer requests in a given status
    pub async fn count_by_status(
        &self,
        church_id: i64,
        status: PrayerStatus,
    ) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM prayer_requests WHERE church_id = $1 AND status = $2",
        )
        .bind(church_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
