//! Goal service implementation
//!
//! Goals hang off a department or a small group; this service validates
//! ownership, payloads, and progress updates.

use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::models::goal::{CreateGoalRequest, Goal, GoalFilter, GoalOwner, UpdateGoalRequest};
use crate::models::{Paged, Pagination};
use crate::services::normalize_listing;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::validation::ValidationErrors;

/// Goal service
#[derive(Clone)]
pub struct GoalService {
    db: DatabaseService,
}

impl GoalService {
    /// Create a new GoalService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Ensure the owning department or group exists in this church
    async fn check_owner(&self, church_id: i64, owner: GoalOwner) -> Result<()> {
        match owner {
            GoalOwner::Department(department_id) => {
                if self
                    .db
                    .departments
                    .find_by_id(church_id, department_id)
                    .await?
                    .is_none()
                {
                    return Err(ShepherdError::DepartmentNotFound { department_id });
                }
            }
            GoalOwner::Group(group_id) => {
                if self.db.groups.find_by_id(church_id, group_id).await?.is_none() {
                    return Err(ShepherdError::GroupNotFound { group_id });
                }
            }
        }

        Ok(())
    }

    /// List goals of a department or group
    pub async fn list(
        &self,
        church_id: i64,
        owner: GoalOwner,
        mut filter: GoalFilter,
        pagination: Pagination,
    ) -> Result<Paged<Goal>> {
        filter.search = normalize_listing(&pagination, filter.search.take())?;
        self.check_owner(church_id, owner).await?;
        debug!(church_id = church_id, page = pagination.page, "Listing goals");

        let (items, total) = futures::try_join!(
            self.db
                .goals
                .list_for_owner(church_id, owner, &filter, pagination),
            self.db.goals.count_for_owner(church_id, owner, &filter),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Get a single goal by ID
    pub async fn get(&self, church_id: i64, goal_id: i64) -> Result<Goal> {
        self.db
            .goals
            .find_by_id(church_id, goal_id)
            .await?
            .ok_or(ShepherdError::GoalNotFound { goal_id })
    }

    /// Create a goal under its owner
    pub async fn create(
        &self,
        church_id: i64,
        owner: GoalOwner,
        request: CreateGoalRequest,
    ) -> Result<Goal> {
        let mut v = ValidationErrors::new();
        v.require("title", &request.title);
        v.max_length("title", &request.title, 200);
        v.into_result()?;

        self.check_owner(church_id, owner).await?;

        if let Some(assignee_id) = request.assignee_id {
            if self.db.members.find_by_id(church_id, assignee_id).await?.is_none() {
                return Err(ShepherdError::MemberNotFound {
                    member_id: assignee_id,
                });
            }
        }

        let goal = self.db.goals.create(church_id, owner, request).await?;
        info!(church_id = church_id, goal_id = goal.id, "Goal created");

        Ok(goal)
    }

    /// Update a goal
    pub async fn update(
        &self,
        church_id: i64,
        goal_id: i64,
        request: UpdateGoalRequest,
    ) -> Result<Goal> {
        let mut v = ValidationErrors::new();
        if let Some(ref title) = request.title {
            v.require("title", title);
            v.max_length("title", title, 200);
        }
        if let Some(progress) = request.progress {
            v.range("progress", progress as i64, 0, 100);
        }
        v.into_result()?;

        if let Some(assignee_id) = request.assignee_id {
            if self.db.members.find_by_id(church_id, assignee_id).await?.is_none() {
                return Err(ShepherdError::MemberNotFound {
                    member_id: assignee_id,
                });
            }
        }

        let goal = self
            .db
            .goals
            .update(church_id, goal_id, request)
            .await?
            .ok_or(ShepherdError::GoalNotFound { goal_id })?;

        info!(church_id = church_id, goal_id = goal_id, "Goal updated");
        Ok(goal)
    }

    /// Delete a goal
    pub async fn delete(&self, church_id: i64, goal_id: i64) -> Result<()> {
        let removed = self.db.goals.delete(church_id, goal_id).await?;
        if !removed {
            return Err(ShepherdError::GoalNotFound { goal_id });
        }

        info!(church_id = church_id, goal_id = goal_id, "Goal deleted");
        Ok(())
    }
}
