//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod cache;
pub mod church;
pub mod communication;
pub mod department;
pub mod discipleship;
pub mod gateway;
pub mod goal;
pub mod group;
pub mod member;
pub mod prayer;
pub mod stats;
pub mod volunteer;

// Re-export commonly used services
pub use auth::{AuthContext, AuthService, Claims, Permission};
pub use cache::CacheService;
pub use church::ChurchService;
pub use communication::{CommunicationService, MessageTemplate};
pub use department::DepartmentService;
pub use discipleship::DiscipleshipService;
pub use gateway::{DeliveryOutcome, GatewayService};
pub use goal::GoalService;
pub use group::GroupService;
pub use member::MemberService;
pub use prayer::PrayerService;
pub use stats::{DashboardStats, StatsService};
pub use volunteer::VolunteerService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::models::{Pagination, MAX_PAGE_SIZE};
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::helpers::normalize_whitespace;

/// Validate common pagination parameters
pub fn check_pagination(pagination: &Pagination) -> Result<()> {
    if pagination.page < 1 {
        return Err(ShepherdError::InvalidInput(
            "Page must be at least 1".to_string(),
        ));
    }

    if pagination.limit < 1 || pagination.limit > MAX_PAGE_SIZE {
        return Err(ShepherdError::InvalidInput(format!(
            "Limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    Ok(())
}

/// Validate pagination and normalize an optional search pattern.
/// Blank input means "no filter"; anything shorter than 2 characters is
/// rejected rather than matched against everything.
pub fn normalize_listing(pagination: &Pagination, search: Option<String>) -> Result<Option<String>> {
    check_pagination(pagination)?;

    match search {
        None => Ok(None),
        Some(raw) => {
            let normalized = normalize_whitespace(&raw);
            if normalized.is_empty() {
                return Ok(None);
            }
            if normalized.chars().count() < 2 {
                return Err(ShepherdError::InvalidInput(
                    "Search pattern must be at least 2 characters".to_string(),
                ));
            }
            Ok(Some(normalized))
        }
    }
}

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub church_service: ChurchService,
    pub member_service: MemberService,
    pub department_service: DepartmentService,
    pub group_service: GroupService,
    pub goal_service: GoalService,
    pub discipleship_service: DiscipleshipService,
    pub prayer_service: PrayerService,
    pub volunteer_service: VolunteerService,
    pub communication_service: CommunicationService,
    pub stats_service: StatsService,
    pub cache_service: CacheService,
    pub gateway_service: GatewayService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService, settings: Settings) -> Result<Self> {
        let cache_service = CacheService::new(settings.clone())?;
        let gateway_service = GatewayService::new(settings.clone())?;

        let auth_service = AuthService::new(db.clone(), settings.clone());
        let church_service = ChurchService::new(db.clone());
        let member_service = MemberService::new(db.clone());
        let department_service = DepartmentService::new(db.clone());
        let group_service = GroupService::new(db.clone());
        let goal_service = GoalService::new(db.clone());
        let discipleship_service = DiscipleshipService::new(db.clone());
        let prayer_service = PrayerService::new(db.clone());
        let volunteer_service = VolunteerService::new(db.clone());
        let communication_service =
            CommunicationService::new(db.clone(), gateway_service.clone(), settings.clone());
        let stats_service = StatsService::new(db, cache_service.clone());

        Ok(Self {
            auth_service,
            church_service,
            member_service,
            department_service,
            group_service,
            goal_service,
            discipleship_service,
            prayer_service,
            volunteer_service,
            communication_service,
            stats_service,
            cache_service,
            gateway_service,
        })
    }

    /// Health check for infrastructure-backed services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let redis_healthy = self.cache_service.health_check().await.unwrap_or(false);
        let gateway_enabled = self.gateway_service.is_enabled();

        ServiceHealthStatus {
            redis_healthy,
            gateway_enabled,
        }
    }
}

/// Health status for infrastructure-backed services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub redis_healthy: bool,
    pub gateway_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pagination_bounds() {
        assert!(check_pagination(&Pagination { page: 1, limit: 20 }).is_ok());
        assert!(check_pagination(&Pagination { page: 0, limit: 20 }).is_err());
        assert!(check_pagination(&Pagination { page: 1, limit: 0 }).is_err());
        assert!(check_pagination(&Pagination { page: 1, limit: 101 }).is_err());
        assert!(check_pagination(&Pagination { page: 1, limit: 100 }).is_ok());
    }

    #[test]
    fn test_normalize_listing() {
        let p = Pagination::default();
        assert_eq!(normalize_listing(&p, None).unwrap(), None);
        assert_eq!(normalize_listing(&p, Some("   ".to_string())).unwrap(), None);
        assert_eq!(
            normalize_listing(&p, Some("  youth   choir ".to_string())).unwrap(),
            Some("youth choir".to_string())
        );
        assert!(normalize_listing(&p, Some("a".to_string())).is_err());
    }
}
