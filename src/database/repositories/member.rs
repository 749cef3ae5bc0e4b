//! Member repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::member::{CreateMemberRequest, Member, MemberFilter, MembershipStatus, UpdateMemberRequest};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;
use crate::utils::helpers::escape_like_pattern;

const MEMBER_COLUMNS: &str = "id, church_id, first_name, last_name, email, phone, address, status, joined_on, baptized_on, notes, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new member
    pub async fn create(&self, church_id: i64, request: CreateMemberRequest) -> Result<Member, ShepherdError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (church_id, first_name, last_name, email, phone, address, status, joined_on, baptized_on, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, church_id, first_name, last_name, email, phone, address, status, joined_on, baptized_on, notes, created_at, updated_at
            "#
        )
        .bind(church_id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.address)
        .bind(request.status.unwrap_or(MembershipStatus::Active))
        .bind(request.joined_on)
        .bind(request.baptized_on)
        .bind(request.notes)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Find member by ID within a church
    pub async fn find_by_id(&self, church_id: i64, id: i64) -> Result<Option<Member>, ShepherdError> {
        let member = sqlx::query_as::<_, Member>(
            &format!("SELECT {MEMBER_COLUMNS} FROM members WHERE church_id = $1 AND id = $2"),
        )
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Find member by email within a church
    pub async fn find_by_email(&self, church_id: i64, email: &str) -> Result<Option<Member>, ShepherdError> {
        let member = sqlx::query_as::<_, Member>(
            &format!("SELECT {MEMBER_COLUMNS} FROM members WHERE church_id = $1 AND email = $2"),
        )
        .bind(church_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Update member; absent fields keep their stored values
    pub async fn update(&self, church_id: i64, id: i64, request: UpdateMemberRequest) -> Result<Option<Member>, ShepherdError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                address = COALESCE($7, address),
                status = COALESCE($8, status),
                joined_on = COALESCE($9, joined_on),
                baptized_on = COALESCE($10, baptized_on),
                notes = COALESCE($11, notes),
                updated_at = $12
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, first_name, last_name, email, phone, address, status, joined_on, baptized_on, notes, created_at, updated_at
            "#
        )
        .bind(church_id)
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.address)
        .bind(request.status)
        .bind(request.joined_on)
        .bind(request.baptized_on)
        .bind(request.notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Delete member; reports whether a row was actually removed
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM members WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List members with search, status filter, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        filter: &MemberFilter,
        pagination: Pagination,
    ) -> Result<Vec<Member>, ShepherdError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let members = sqlx::query_as::<_, Member>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM members
            WHERE church_id = $1
              AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
              AND ($3::membership_status IS NULL OR status = $3)
            ORDER BY last_name ASC, first_name ASC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(church_id)
        .bind(pattern.clone())
        .bind(filter.status)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Count members matching the same filter as `list`
    pub async fn count(&self, church_id: i64, filter: &MemberFilter) -> Result<i64, ShepherdError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like_pattern(s)));

        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM members
            WHERE church_id = $1
              AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
              AND ($3::membership_status IS NULL OR status = $3)
            "#,
        )
        .bind(church_id)
        .bind(pattern)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count members in a given status
    pub async fn count_by_status(&self, church_id: i64, status: MembershipStatus) -> Result<i64, ShepherdError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM members WHERE church_id = $1 AND status = $2")
                .bind(church_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Every member on the roll, regardless of status
    pub async fn list_all(&self, church_id: i64) -> Result<Vec<Member>, ShepherdError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE church_id = $1 ORDER BY id ASC"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Active members only
    pub async fn list_active(&self, church_id: i64) -> Result<Vec<Member>, ShepherdError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE church_id = $1 AND status = 'active' ORDER BY id ASC"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Members by id set, preserving church scoping
    pub async fn list_by_ids(&self, church_id: i64, ids: &[i64]) -> Result<Vec<Member>, ShepherdError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE church_id = $1 AND id = ANY($2) ORDER BY id ASC"
        ))
        .bind(church_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Members currently leading a department or a small group
    pub async fn list_leaders(&self, church_id: i64) -> Result<Vec<Member>, ShepherdError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM members
            WHERE church_id = $1
              AND (id IN (SELECT leader_id FROM departments WHERE church_id = $1 AND leader_id IS NOT NULL)
                OR id IN (SELECT leader_id FROM small_groups WHERE church_id = $1 AND leader_id IS NOT NULL))
            ORDER BY id ASC
            "#
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}
