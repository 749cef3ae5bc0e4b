//! Volunteer service implementation
//!
//! This service handles volunteer records: onboarding, department/role
//! assignment, and approval.

use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::models::volunteer::{
    CreateVolunteerRequest, UpdateVolunteerRequest, Volunteer, VolunteerFilter, VolunteerStatus,
};
use crate::models::{Paged, Pagination};
use crate::services::normalize_listing;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::validation::ValidationErrors;

/// Volunteer service
#[derive(Clone)]
pub struct VolunteerService {
    db: DatabaseService,
}

impl VolunteerService {
    /// Create a new VolunteerService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// List volunteers with search, filters, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        mut filter: VolunteerFilter,
        pagination: Pagination,
    ) -> Result<Paged<Volunteer>> {
        filter.search = normalize_listing(&pagination, filter.search.take())?;
        debug!(church_id = church_id, page = pagination.page, "Listing volunteers");

        let (items, total) = futures::try_join!(
            self.db.volunteers.list(church_id, &filter, pagination),
            self.db.volunteers.count(church_id, &filter),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Get a single volunteer by ID
    pub async fn get(&self, church_id: i64, volunteer_id: i64) -> Result<Volunteer> {
        self.db
            .volunteers
            .find_by_id(church_id, volunteer_id)
            .await?
            .ok_or(ShepherdError::VolunteerNotFound { volunteer_id })
    }

    /// Register a volunteer. New records start in `pending` until approved.
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateVolunteerRequest,
    ) -> Result<Volunteer> {
        let mut v = ValidationErrors::new();
        v.require("role_title", &request.role_title);
        v.max_length("role_title", &request.role_title, 150);
        v.into_result()?;

        if self
            .db
            .members
            .find_by_id(church_id, request.member_id)
            .await?
            .is_none()
        {
            return Err(ShepherdError::MemberNotFound {
                member_id: request.member_id,
            });
        }

        if self
            .db
            .departments
            .find_by_id(church_id, request.department_id)
            .await?
            .is_none()
        {
            return Err(ShepherdError::DepartmentNotFound {
                department_id: request.department_id,
            });
        }

        let volunteer = self.db.volunteers.create(church_id, request).await?;
        info!(church_id = church_id, volunteer_id = volunteer.id, "Volunteer registered");

        Ok(volunteer)
    }

    /// Update a volunteer record
    pub async fn update(
        &self,
        church_id: i64,
        volunteer_id: i64,
        request: UpdateVolunteerRequest,
    ) -> Result<Volunteer> {
        let mut v = ValidationErrors::new();
        if let Some(ref role_title) = request.role_title {
            v.require("role_title", role_title);
            v.max_length("role_title", role_title, 150);
        }
        v.into_result()?;

        if let Some(department_id) = request.department_id {
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

        let volunteer = self
            .db
            .volunteers
            .update(church_id, volunteer_id, request)
            .await?
            .ok_or(ShepherdError::VolunteerNotFound { volunteer_id })?;

        info!(church_id = church_id, volunteer_id = volunteer_id, "Volunteer updated");
        Ok(volunteer)
    }

    /// Approve a pending volunteer
    pub async fn approve(&self, church_id: i64, volunteer_id: i64) -> Result<Volunteer> {
        let current = self.get(church_id, volunteer_id).await?;

        if current.status != VolunteerStatus::Pending {
            return Err(ShepherdError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: VolunteerStatus::Active.to_string(),
            });
        }

        let update = UpdateVolunteerRequest {
            status: Some(VolunteerStatus::Active),
            ..Default::default()
        };

        let volunteer = self
            .db
            .volunteers
            .update(church_id, volunteer_id, update)
            .await?
            .ok_or(ShepherdError::VolunteerNotFound { volunteer_id })?;

        info!(church_id = church_id, volunteer_id = volunteer_id, "Volunteer approved");
        Ok(volunteer)
    }

    /// Delete a volunteer record
    pub async fn delete(&self, church_id: i64, volunteer_id: i64) -> Result<()> {
        let removed = self.db.volunteers.delete(church_id, volunteer_id).await?;
        if !removed {
            return Err(ShepherdError::VolunteerNotFound { volunteer_id });
        }

        info!(church_id = church_id, volunteer_id = volunteer_id, "Volunteer deleted");
        Ok(())
    }
}
