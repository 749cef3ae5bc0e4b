//! Church tenant service implementation
//!
//! This service handles church registration (the only unauthenticated
//! mutation), profile management, and tenant settings.

use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::models::admin::AdminRole;
use crate::models::church::{
    Church, ChurchRegistration, RegisterChurchRequest, UpdateChurchRequest,
    UpdateChurchSettingsRequest,
};
use crate::services::auth::AuthService;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::helpers::generate_random_string;
use crate::utils::validation::ValidationErrors;

const DEFAULT_TIMEZONE: &str = "UTC";

/// Church tenant service
#[derive(Clone)]
pub struct ChurchService {
    db: DatabaseService,
}

impl ChurchService {
    /// Create a new ChurchService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Register a new church tenant together with its first administrator.
    /// The generated admin password is returned exactly once.
    pub async fn register(&self, request: RegisterChurchRequest) -> Result<ChurchRegistration> {
        let mut v = ValidationErrors::new();
        v.require("name", &request.name);
        v.max_length("name", &request.name, 200);
        v.require("email", &request.email);
        if !request.email.trim().is_empty() {
            v.email("email", &request.email);
        }
        if let Some(ref phone) = request.phone {
            v.phone("phone", phone);
        }
        v.require("admin_full_name", &request.admin_full_name);
        v.require("admin_email", &request.admin_email);
        if !request.admin_email.trim().is_empty() {
            v.email("admin_email", &request.admin_email);
        }
        v.into_result()?;

        if self.db.churches.find_by_email(&request.email).await?.is_some() {
            return Err(ShepherdError::InvalidInput(format!(
                "A church with email {} is already registered",
                request.email
            )));
        }

        let church = self
            .db
            .churches
            .create(
                &request.name,
                &request.email,
                request.phone.as_deref(),
                request.address.as_deref(),
                request.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE),
            )
            .await?;

        let temporary_password = generate_random_string(16);
        let password_hash = AuthService::hash_password(&temporary_password)?;

        self.db
            .admins
            .create(
                church.id,
                &request.admin_email,
                &request.admin_full_name,
                &password_hash,
                AdminRole::ChurchAdmin,
            )
            .await?;

        info!(church_id = church.id, name = %church.name, "Church registered");

        Ok(ChurchRegistration {
            admin_email: request.admin_email,
            temporary_password,
            church,
        })
    }

    /// Get a church by ID
    pub async fn get(&self, church_id: i64) -> Result<Church> {
        self.db
            .churches
            .find_by_id(church_id)
            .await?
            .ok_or(ShepherdError::ChurchNotFound { church_id })
    }

    /// Update church profile
    pub async fn update(&self, church_id: i64, request: UpdateChurchRequest) -> Result<Church> {
        let mut v = ValidationErrors::new();
        if let Some(ref name) = request.name {
            v.require("name", name);
            v.max_length("name", name, 200);
        }
        if let Some(ref email) = request.email {
            v.email("email", email);
        }
        if let Some(ref phone) = request.phone {
            v.phone("phone", phone);
        }
        v.into_result()?;

        let church = self
            .db
            .churches
            .update(church_id, request)
            .await?
            .ok_or(ShepherdError::ChurchNotFound { church_id })?;

        info!(church_id = church_id, "Church profile updated");
        Ok(church)
    }

    /// Replace tenant preferences
    pub async fn update_settings(
        &self,
        church_id: i64,
        request: UpdateChurchSettingsRequest,
    ) -> Result<Church> {
        if !request.settings.is_object() {
            return Err(ShepherdError::InvalidInput(
                "Settings must be a JSON object".to_string(),
            ));
        }

        debug!(church_id = church_id, "Updating tenant settings");

        let church = self
            .db
            .churches
            .update_settings(church_id, request.settings)
            .await?
            .ok_or(ShepherdError::ChurchNotFound { church_id })?;

        info!(church_id = church_id, "Tenant settings updated");
        Ok(church)
    }

    /// List churches (platform administration)
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Church>> {
        if limit > crate::models::MAX_PAGE_SIZE {
            return Err(ShepherdError::InvalidInput(format!(
                "Limit cannot exceed {}",
                crate::models::MAX_PAGE_SIZE
            )));
        }

        self.db.churches.list(limit, offset).await
    }

    /// Activate or deactivate a tenant (platform administration)
    pub async fn set_active(&self, church_id: i64, is_active: bool) -> Result<Church> {
        let church = self
            .db
            .churches
            .set_active(church_id, is_active)
            .await?
            .ok_or(ShepherdError::ChurchNotFound { church_id })?;

        info!(church_id = church_id, is_active = is_active, "Church active flag changed");
        Ok(church)
    }
}
