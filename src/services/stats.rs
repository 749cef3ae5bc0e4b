//! Dashboard statistics service implementation
//!
//! Aggregates are computed server-side over the whole tenant data set and
//! cached briefly in Redis. A broken cache degrades to direct queries, never
//! to a failed request.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::database::DatabaseService;
use crate::models::member::MembershipStatus;
use crate::models::prayer::PrayerStatus;
use crate::models::volunteer::VolunteerStatus;
use crate::services::cache::CacheService;
use crate::utils::errors::Result;
use crate::utils::helpers::percent_used;

/// Church-wide dashboard aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub active_members: i64,
    pub department_count: i64,
    pub group_count: i64,
    pub group_capacity_percent: i32,
    pub average_goal_progress: i32,
    pub open_prayer_requests: i64,
    pub active_volunteers: i64,
    pub active_disciples: i64,
    pub messages_sent: i64,
    pub messages_failed: i64,
}

/// Statistics service for dashboard screens
#[derive(Clone)]
pub struct StatsService {
    db: DatabaseService,
    cache: CacheService,
}

impl StatsService {
    /// Create a new StatsService instance
    pub fn new(db: DatabaseService, cache: CacheService) -> Self {
        Self { db, cache }
    }

    fn dashboard_key(church_id: i64) -> String {
        format!("stats:{}:dashboard", church_id)
    }

    /// Church dashboard aggregates, cached briefly
    pub async fn dashboard(&self, church_id: i64) -> Result<DashboardStats> {
        let key = Self::dashboard_key(church_id);

        match self.cache.get::<DashboardStats>(&key).await {
            Ok(Some(stats)) => {
                debug!(church_id = church_id, "Dashboard stats served from cache");
                return Ok(stats);
            }
            Ok(None) => {}
            Err(e) => warn!(church_id = church_id, error = %e, "Stats cache read failed"),
        }

        let stats = self.compute_dashboard(church_id).await?;

        if let Err(e) = self.cache.set(&key, &stats, None).await {
            warn!(church_id = church_id, error = %e, "Stats cache write failed");
        }

        Ok(stats)
    }

    /// Drop cached aggregates after a mutation
    pub async fn invalidate(&self, church_id: i64) {
        if let Err(e) = self.cache.invalidate_church(church_id).await {
            warn!(church_id = church_id, error = %e, "Stats cache invalidation failed");
        }
    }

    async fn compute_dashboard(&self, church_id: i64) -> Result<DashboardStats> {
        let member_filter = Default::default();

        let (
            total_members,
            active_members,
            department_count,
            group_count,
            (seats_taken, seats_total),
            average_goal_progress,
            open_prayer_requests,
            active_volunteers,
            active_disciples,
            (messages_sent, messages_failed),
        ) = futures::try_join!(
            self.db.members.count(church_id, &member_filter),
            self.db.members.count_by_status(church_id, MembershipStatus::Active),
            self.db.departments.count_all(church_id),
            self.db.groups.count_all(church_id),
            self.db.groups.capacity_utilization(church_id),
            self.db.goals.average_progress(church_id),
            self.db.prayers.count_by_status(church_id, PrayerStatus::Open),
            self.db
                .volunteers
                .count_by_status(church_id, VolunteerStatus::Active),
            self.db.discipleship.count_disciples(
                church_id,
                None,
                Some(crate::models::discipleship::DiscipleStatus::Active)
            ),
            self.db.communications.message_outcome_counts(church_id),
        )?;

        Ok(DashboardStats {
            total_members,
            active_members,
            department_count,
            group_count,
            group_capacity_percent: percent_used(seats_taken, seats_total),
            average_goal_progress,
            open_prayer_requests,
            active_volunteers,
            active_disciples,
            messages_sent,
            messages_failed,
        })
    }
}
