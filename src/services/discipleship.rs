//! Discipleship service implementation
//!
//! This service handles mentors and disciples: enrollment, capacity-bounded
//! mentor assignment, and staged progress tracking.

use chrono::Utc;
use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::models::discipleship::{
    CreateDiscipleRequest, CreateMentorRequest, Disciple, DiscipleStatus, DiscipleshipStage,
    Mentor, UpdateDiscipleRequest, UpdateMentorRequest,
};
use crate::models::{Paged, Pagination};
use crate::services::check_pagination;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::validation::ValidationErrors;

/// Discipleship service
#[derive(Clone)]
pub struct DiscipleshipService {
    db: DatabaseService,
}

impl DiscipleshipService {
    /// Create a new DiscipleshipService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Register a member as a mentor
    pub async fn create_mentor(
        &self,
        church_id: i64,
        request: CreateMentorRequest,
    ) -> Result<Mentor> {
        let mut v = ValidationErrors::new();
        if let Some(capacity) = request.capacity {
            v.positive("capacity", capacity as i64);
        }
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

        let mentor = self.db.discipleship.create_mentor(church_id, request).await?;
        info!(church_id = church_id, mentor_id = mentor.id, "Mentor registered");

        Ok(mentor)
    }

    /// Update a mentor. Capacity may never drop below the current load.
    pub async fn update_mentor(
        &self,
        church_id: i64,
        mentor_id: i64,
        request: UpdateMentorRequest,
    ) -> Result<Mentor> {
        let mut v = ValidationErrors::new();
        if let Some(capacity) = request.capacity {
            v.positive("capacity", capacity as i64);
        }
        v.into_result()?;

        if let Some(capacity) = request.capacity {
            let load = self.db.discipleship.mentor_load(mentor_id).await?;
            if (capacity as i64) < load {
                return Err(ShepherdError::MentorAtCapacity { mentor_id });
            }
        }

        self.db
            .discipleship
            .update_mentor(church_id, mentor_id, request)
            .await?
            .ok_or_else(|| ShepherdError::InvalidInput(format!(
                "Mentor not found: {}",
                mentor_id
            )))
    }

    /// List mentors
    pub async fn list_mentors(
        &self,
        church_id: i64,
        pagination: Pagination,
    ) -> Result<Paged<Mentor>> {
        check_pagination(&pagination)?;
        debug!(church_id = church_id, page = pagination.page, "Listing mentors");

        let (items, total) = futures::try_join!(
            self.db.discipleship.list_mentors(church_id, pagination),
            self.db.discipleship.count_mentors(church_id),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Enroll a member as a disciple, optionally assigning a mentor up front
    pub async fn create_disciple(
        &self,
        church_id: i64,
        request: CreateDiscipleRequest,
    ) -> Result<Disciple> {
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

        let mentor_id = request.mentor_id;
        let mut create = request;
        // Assignment goes through the capacity check below
        create.mentor_id = None;

        let disciple = self.db.discipleship.create_disciple(church_id, create).await?;
        info!(church_id = church_id, disciple_id = disciple.id, "Disciple enrolled");

        match mentor_id {
            Some(mentor_id) => self.assign_mentor(church_id, disciple.id, mentor_id).await,
            None => Ok(disciple),
        }
    }

    /// Get a single disciple by ID
    pub async fn get_disciple(&self, church_id: i64, disciple_id: i64) -> Result<Disciple> {
        self.db
            .discipleship
            .find_disciple(church_id, disciple_id)
            .await?
            .ok_or_else(|| ShepherdError::InvalidInput(format!(
                "Disciple not found: {}",
                disciple_id
            )))
    }

    /// List disciples, optionally narrowed to a mentor or status
    pub async fn list_disciples(
        &self,
        church_id: i64,
        mentor_id: Option<i64>,
        status: Option<DiscipleStatus>,
        pagination: Pagination,
    ) -> Result<Paged<Disciple>> {
        check_pagination(&pagination)?;
        debug!(church_id = church_id, page = pagination.page, "Listing disciples");

        let (items, total) = futures::try_join!(
            self.db
                .discipleship
                .list_disciples(church_id, mentor_id, status, pagination),
            self.db
                .discipleship
                .count_disciples(church_id, mentor_id, status),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Assign a disciple to a mentor, honoring the mentor's capacity
    pub async fn assign_mentor(
        &self,
        church_id: i64,
        disciple_id: i64,
        mentor_id: i64,
    ) -> Result<Disciple> {
        let disciple = self.db.assign_mentor(church_id, disciple_id, mentor_id).await?;

        info!(
            church_id = church_id,
            disciple_id = disciple_id,
            mentor_id = mentor_id,
            "Mentor assigned"
        );
        Ok(disciple)
    }

    /// Update disciple progress. Reaching 100 in the final stage completes
    /// the program.
    pub async fn update_progress(
        &self,
        church_id: i64,
        disciple_id: i64,
        progress: i32,
        stage: Option<DiscipleshipStage>,
    ) -> Result<Disciple> {
        let mut v = ValidationErrors::new();
        v.range("progress", progress as i64, 0, 100);
        v.into_result()?;

        let current = self.get_disciple(church_id, disciple_id).await?;
        let effective_stage = stage.unwrap_or(current.stage);
        let completed = progress == 100 && effective_stage == DiscipleshipStage::Multiplying;

        let update = UpdateDiscipleRequest {
            stage,
            progress: Some(progress),
            status: completed.then_some(DiscipleStatus::Completed),
            completed_on: completed.then(|| Utc::now().date_naive()),
            ..Default::default()
        };

        let disciple = self
            .db
            .discipleship
            .update_disciple(church_id, disciple_id, update)
            .await?
            .ok_or_else(|| ShepherdError::InvalidInput(format!(
                "Disciple not found: {}",
                disciple_id
            )))?;

        info!(
            disciple_id = disciple_id,
            progress = progress,
            completed = completed,
            "Disciple progress updated"
        );
        Ok(disciple)
    }

    /// Update disciple fields
    pub async fn update_disciple(
        &self,
        church_id: i64,
        disciple_id: i64,
        request: UpdateDiscipleRequest,
    ) -> Result<Disciple> {
        let mut v = ValidationErrors::new();
        if let Some(progress) = request.progress {
            v.range("progress", progress as i64, 0, 100);
        }
        v.into_result()?;

        if let Some(mentor_id) = request.mentor_id {
            // Route assignment through the capacity check
            self.assign_mentor(church_id, disciple_id, mentor_id).await?;
        }

        let mut update = request;
        update.mentor_id = None;

        self.db
            .discipleship
            .update_disciple(church_id, disciple_id, update)
            .await?
            .ok_or_else(|| ShepherdError::InvalidInput(format!(
                "Disciple not found: {}",
                disciple_id
            )))
    }

    /// Remove a disciple record
    pub async fn delete_disciple(&self, church_id: i64, disciple_id: i64) -> Result<()> {
        let removed = self
            .db
            .discipleship
            .delete_disciple(church_id, disciple_id)
            .await?;
        if !removed {
            return Err(ShepherdError::InvalidInput(format!(
                "Disciple not found: {}",
                disciple_id
            )));
        }

        info!(church_id = church_id, disciple_id = disciple_id, "Disciple removed");
        Ok(())
    }
}
