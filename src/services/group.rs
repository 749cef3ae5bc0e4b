//! Small group service implementation
//!
//! This service handles small groups: profile management, capacity-bounded
//! membership, and occupancy reporting.

use tracing::{debug, info, warn};

use crate::database::DatabaseService;
use crate::models::group::{
    CreateGroupRequest, GroupMember, GroupWithOccupancy, JoinGroupRequest, SmallGroup,
    UpdateGroupRequest,
};
use crate::models::{Paged, Pagination};
use crate::services::normalize_listing;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::validation::ValidationErrors;

/// Small group service
#[derive(Clone)]
pub struct GroupService {
    db: DatabaseService,
}

impl GroupService {
    /// Create a new GroupService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// List groups with occupancy, search, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<String>,
        pagination: Pagination,
    ) -> Result<Paged<GroupWithOccupancy>> {
        let search = normalize_listing(&pagination, search)?;
        debug!(church_id = church_id, page = pagination.page, "Listing groups");

        let (items, total) = futures::try_join!(
            self.db.groups.list(church_id, search.as_deref(), pagination),
            self.db.groups.count(church_id, search.as_deref()),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Get a single group with its member count
    pub async fn get(&self, church_id: i64, group_id: i64) -> Result<GroupWithOccupancy> {
        self.db
            .groups
            .find_with_occupancy(church_id, group_id)
            .await?
            .ok_or(ShepherdError::GroupNotFound { group_id })
    }

    /// Create a group
    pub async fn create(&self, church_id: i64, request: CreateGroupRequest) -> Result<SmallGroup> {
        let mut v = ValidationErrors::new();
        v.require("name", &request.name);
        v.max_length("name", &request.name, 150);
        v.positive("max_capacity", request.max_capacity as i64);
        v.into_result()?;

        if let Some(leader_id) = request.leader_id {
            if self.db.members.find_by_id(church_id, leader_id).await?.is_none() {
                return Err(ShepherdError::MemberNotFound { member_id: leader_id });
            }
        }

        let group = self.db.groups.create(church_id, request).await?;
        info!(church_id = church_id, group_id = group.id, "Group created");

        Ok(group)
    }

    /// Update a group. Capacity may never drop below the seats already taken.
    pub async fn update(
        &self,
        church_id: i64,
        group_id: i64,
        request: UpdateGroupRequest,
    ) -> Result<SmallGroup> {
        let mut v = ValidationErrors::new();
        if let Some(ref name) = request.name {
            v.require("name", name);
            v.max_length("name", name, 150);
        }
        if let Some(max_capacity) = request.max_capacity {
            v.positive("max_capacity", max_capacity as i64);
        }
        v.into_result()?;

        if let Some(max_capacity) = request.max_capacity {
            let current = self.db.groups.member_count(group_id).await?;
            if (max_capacity as i64) < current {
                warn!(
                    group_id = group_id,
                    max_capacity = max_capacity,
                    current_members = current,
                    "Rejected capacity below current membership"
                );
                return Err(ShepherdError::GroupFull { group_id });
            }
        }

        let group = self
            .db
            .groups
            .update(church_id, group_id, request)
            .await?
            .ok_or(ShepherdError::GroupNotFound { group_id })?;

        info!(church_id = church_id, group_id = group_id, "Group updated");
        Ok(group)
    }

    /// Delete a group
    pub async fn delete(&self, church_id: i64, group_id: i64) -> Result<()> {
        let removed = self.db.groups.delete(church_id, group_id).await?;
        if !removed {
            return Err(ShepherdError::GroupNotFound { group_id });
        }

        info!(church_id = church_id, group_id = group_id, "Group deleted");
        Ok(())
    }

    /// Add a member to the group, honoring capacity
    pub async fn join(
        &self,
        church_id: i64,
        group_id: i64,
        request: JoinGroupRequest,
    ) -> Result<GroupMember> {
        let member = self.db.join_group(church_id, group_id, request).await?;

        info!(
            group_id = group_id,
            member_id = member.member_id,
            "Member joined group"
        );
        Ok(member)
    }

    /// Remove a member from the group
    pub async fn leave(&self, church_id: i64, group_id: i64, member_id: i64) -> Result<()> {
        // Scope check before touching the join table
        if self.db.groups.find_by_id(church_id, group_id).await?.is_none() {
            return Err(ShepherdError::GroupNotFound { group_id });
        }

        let removed = self.db.groups.remove_member(group_id, member_id).await?;
        if !removed {
            return Err(ShepherdError::InvalidInput(
                "Member does not belong to this group".to_string(),
            ));
        }

        info!(group_id = group_id, member_id = member_id, "Member left group");
        Ok(())
    }

    /// Group members
    pub async fn members(&self, church_id: i64, group_id: i64) -> Result<Vec<GroupMember>> {
        if self.db.groups.find_by_id(church_id, group_id).await?.is_none() {
            return Err(ShepherdError::GroupNotFound { group_id });
        }
        self.db.groups.get_members(group_id).await
    }
}
