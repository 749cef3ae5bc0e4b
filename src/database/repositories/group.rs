//! Small group repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::group::{
    CreateGroupRequest, GroupMember, GroupWithOccupancy, JoinGroupRequest, SmallGroup,
    UpdateGroupRequest,
};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;
use crate::utils::helpers::escape_like_pattern;

const GROUP_COLUMNS: &str = "id, church_id, name, description, leader_id, meeting_day, meeting_time, location, max_capacity, is_active, created_at, updated_at";

const GROUP_WITH_OCCUPANCY: &str = r#"
    SELECT g.id, g.church_id, g.name, g.description, g.leader_id, g.meeting_day,
           g.meeting_time, g.location, g.max_capacity, g.is_active,
           COUNT(gm.id) AS current_members, g.created_at, g.updated_at
    FROM small_groups g
    LEFT JOIN group_members gm ON g.id = gm.group_id
"#;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new small group
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateGroupRequest,
    ) -> Result<SmallGroup, ShepherdError> {
        let group = sqlx::query_as::<_, SmallGroup>(
            r#"
            INSERT INTO small_groups (church_id, name, description, leader_id, meeting_day, meeting_time, location, max_capacity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, church_id, name, description, leader_id, meeting_day, meeting_time, location, max_capacity, is_active, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.leader_id)
        .bind(request.meeting_day)
        .bind(request.meeting_time)
        .bind(request.location)
        .bind(request.max_capacity)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find group by ID within a church
    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<SmallGroup>, ShepherdError> {
        let group = sqlx::query_as::<_, SmallGroup>(&format!(
            "SELECT {GROUP_COLUMNS} FROM small_groups WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find group by ID including its current member count
    pub async fn find_with_occupancy(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<GroupWithOccupancy>, ShepherdError> {
        let group = sqlx::query_as::<_, GroupWithOccupancy>(&format!(
            r#"
            {GROUP_WITH_OCCUPANCY}
            WHERE g.church_id = $1 AND g.id = $2
            GROUP BY g.id
            "#
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Update group; absent fields keep their stored values
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateGroupRequest,
    ) -> Result<Option<SmallGroup>, ShepherdError> {
        let group = sqlx::query_as::<_, SmallGroup>(
            r#"
            UPDATE small_groups
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                leader_id = COALESCE($5, leader_id),
                meeting_day = COALESCE($6, meeting_day),
                meeting_time = COALESCE($7, meeting_time),
                location = COALESCE($8, location),
                max_capacity = COALESCE($9, max_capacity),
                is_active = COALESCE($10, is_active),
                updated_at = $11
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, name, description, leader_id, meeting_day, meeting_time, location, max_capacity, is_active, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.leader_id)
        .bind(request.meeting_day)
        .bind(request.meeting_time)
        .bind(request.location)
        .bind(request.max_capacity)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Delete group; reports whether a row was actually removed
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM small_groups WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List groups with member counts, search, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<GroupWithOccupancy>, ShepherdError> {
        let pattern = search.map(|s| format!("%{}%", escape_like_pattern(s)));

        let groups = sqlx::query_as::<_, GroupWithOccupancy>(&format!(
            r#"
            {GROUP_WITH_OCCUPANCY}
            WHERE g.church_id = $1
              AND ($2::text IS NULL OR g.name ILIKE $2 OR g.location ILIKE $2)
            GROUP BY g.id
            ORDER BY g.name ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(pattern)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Count groups matching the same filter as `list`
    pub async fn count(&self, church_id: i64, search: Option<&str>) -> Result<i64, ShepherdError> {
        let pattern = search.map(|s| format!("%{}%", escape_like_pattern(s)));

        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM small_groups
            WHERE church_id = $1
              AND ($2::text IS NULL OR name ILIKE $2 OR location ILIKE $2)
            "#,
        )
        .bind(church_id)
        .bind(pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Add member to group
    pub async fn add_member(
        &self,
        group_id: i64,
        request: JoinGroupRequest,
    ) -> Result<GroupMember, ShepherdError> {
        let member = sqlx::query_as::<_, GroupMember>(
            r#"
            INSERT INTO group_members (group_id, member_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, group_id, member_id, role, joined_at
            "#,
        )
        .bind(group_id)
        .bind(request.member_id)
        .bind(request.role.unwrap_or_else(|| "member".to_string()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Remove member from group
    pub async fn remove_member(&self, group_id: i64, member_id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND member_id = $2")
            .bind(group_id)
            .bind(member_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get group members
    pub async fn get_members(&self, group_id: i64) -> Result<Vec<GroupMember>, ShepherdError> {
        let members = sqlx::query_as::<_, GroupMember>(
            "SELECT id, group_id, member_id, role, joined_at FROM group_members WHERE group_id = $1 ORDER BY joined_at ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Check if member belongs to group
    pub async fn is_member(&self, group_id: i64, member_id: i64) -> Result<bool, ShepherdError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM group_members WHERE group_id = $1 AND member_id = $2",
        )
        .bind(group_id)
        .bind(member_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Count members in a group
    pub async fn member_count(&self, group_id: i64) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_members WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Seats taken and total capacity across a church's groups
    pub async fn capacity_utilization(&self, church_id: i64) -> Result<(i64, i64), ShepherdError> {
        let totals: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE((SELECT COUNT(*) FROM group_members gm
                             INNER JOIN small_groups g ON g.id = gm.group_id
                             WHERE g.church_id = $1), 0),
                   COALESCE((SELECT SUM(max_capacity)::bigint FROM small_groups WHERE church_id = $1), 0)
            "#,
        )
        .bind(church_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    /// Count all groups of a church
    pub async fn count_all(&self, church_id: i64) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM small_groups WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
