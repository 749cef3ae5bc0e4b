//! Prayer request service implementation
//!
//! This service handles prayer requests and their forward-only lifecycle.

use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::models::prayer::{
    CreatePrayerRequest, PrayerFilter, PrayerRequest, PrayerStatus, UpdatePrayerRequest,
};
use crate::models::{Paged, Pagination};
use crate::services::normalize_listing;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::validation::ValidationErrors;

/// Prayer request service
#[derive(Clone)]
pub struct PrayerService {
    db: DatabaseService,
}

impl PrayerService {
    /// Create a new PrayerService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// List prayer requests with search, filters, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        mut filter: PrayerFilter,
        pagination: Pagination,
    ) -> Result<Paged<PrayerRequest>> {
        filter.search = normalize_listing(&pagination, filter.search.take())?;
        debug!(church_id = church_id, page = pagination.page, "Listing prayer requests");

        let (items, total) = futures::try_join!(
            self.db.prayers.list(church_id, &filter, pagination),
            self.db.prayers.count(church_id, &filter),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Get a single prayer request by ID
    pub async fn get(&self, church_id: i64, request_id: i64) -> Result<PrayerRequest> {
        self.db
            .prayers
            .find_by_id(church_id, request_id)
            .await?
            .ok_or(ShepherdError::PrayerRequestNotFound { request_id })
    }

    /// Create a prayer request
    pub async fn create(
        &self,
        church_id: i64,
        request: CreatePrayerRequest,
    ) -> Result<PrayerRequest> {
        let mut v = ValidationErrors::new();
        v.require("title", &request.title);
        v.max_length("title", &request.title, 200);
        v.into_result()?;

        if let Some(member_id) = request.member_id {
            if self.db.members.find_by_id(church_id, member_id).await?.is_none() {
                return Err(ShepherdError::MemberNotFound { member_id });
            }
        }

        let prayer = self.db.prayers.create(church_id, request).await?;
        info!(church_id = church_id, request_id = prayer.id, "Prayer request created");

        Ok(prayer)
    }

    /// Update prayer request content
    pub async fn update(
        &self,
        church_id: i64,
        request_id: i64,
        request: UpdatePrayerRequest,
    ) -> Result<PrayerRequest> {
        let mut v = ValidationErrors::new();
        if let Some(ref title) = request.title {
            v.require("title", title);
            v.max_length("title", title, 200);
        }
        v.into_result()?;

        let prayer = self
            .db
            .prayers
            .update(church_id, request_id, request)
            .await?
            .ok_or(ShepherdError::PrayerRequestNotFound { request_id })?;

        info!(church_id = church_id, request_id = request_id, "Prayer request updated");
        Ok(prayer)
    }

    /// Move a prayer request along its lifecycle
    pub async fn set_status(
        &self,
        church_id: i64,
        request_id: i64,
        status: PrayerStatus,
    ) -> Result<PrayerRequest> {
        let current = self.get(church_id, request_id).await?;

        if !current.status.can_transition_to(status) {
            return Err(ShepherdError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        let prayer = self
            .db
            .prayers
            .set_status(church_id, request_id, status)
            .await?
            .ok_or(ShepherdError::PrayerRequestNotFound { request_id })?;

        info!(
            church_id = church_id,
            request_id = request_id,
            status = %status,
            "Prayer request status changed"
        );
        Ok(prayer)
    }

    /// Delete a prayer request
    pub async fn delete(&self, church_id: i64, request_id: i64) -> Result<()> {
        let removed = self.db.prayers.delete(church_id, request_id).await?;
        if !removed {
            return Err(ShepherdError::PrayerRequestNotFound { request_id });
        }

        info!(church_id = church_id, request_id = request_id, "Prayer request deleted");
        Ok(())
    }
}
