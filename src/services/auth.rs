//! Authentication service implementation
//!
//! This service handles admin authentication and authorization: password
//! hashing, JWT issue/verify, role-based permission checks, and admin
//! account provisioning.

use std::collections::HashSet;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::models::admin::{
    Admin, AdminCreated, AdminRole, CreateAdminRequest, LoginRequest, LoginResponse,
};
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::helpers::generate_random_string;
use crate::utils::validation::ValidationErrors;

/// Permission levels for different operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Read any tenant-local record
    ViewRecords,
    /// Create, update, and delete tenant-local records
    ManageRecords,
    /// Manage tenant settings and admin accounts
    ManageTenant,
    /// Manage churches across the platform
    ManagePlatform,
}

impl AdminRole {
    /// Permissions granted by this role
    pub fn permissions(&self) -> HashSet<Permission> {
        let mut perms = HashSet::new();
        perms.insert(Permission::ViewRecords);

        match self {
            AdminRole::Staff => {}
            AdminRole::DepartmentLead => {
                perms.insert(Permission::ManageRecords);
            }
            AdminRole::ChurchAdmin => {
                perms.insert(Permission::ManageRecords);
                perms.insert(Permission::ManageTenant);
            }
            AdminRole::SuperAdmin => {
                perms.insert(Permission::ManageRecords);
                perms.insert(Permission::ManageTenant);
                perms.insert(Permission::ManagePlatform);
            }
        }

        perms
    }
}

/// Authentication context for a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub admin_id: i64,
    pub church_id: i64,
    pub role: AdminRole,
    pub permissions: HashSet<Permission>,
}

impl AuthContext {
    pub fn new(admin_id: i64, church_id: i64, role: AdminRole) -> Self {
        Self {
            admin_id,
            church_id,
            role,
            permissions: role.permissions(),
        }
    }

    /// Check a permission, failing with `PermissionDenied` otherwise
    pub fn require(&self, permission: Permission) -> Result<()> {
        if self.permissions.contains(&permission) {
            Ok(())
        } else {
            warn!(
                admin_id = self.admin_id,
                church_id = self.church_id,
                role = %self.role,
                "Permission check failed"
            );
            Err(ShepherdError::PermissionDenied(format!(
                "{} role cannot perform this operation",
                self.role
            )))
        }
    }
}

/// JWT claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub church_id: i64,
    pub role: AdminRole,
    pub iat: i64,
    pub exp: i64,
}

/// Authentication service for login and token management
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseService,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        Self { db, settings }
    }

    /// Hash a password with argon2id
    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ShepherdError::Authentication(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a password against its stored hash
    pub fn verify_password(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Issue a signed token for an admin
    pub fn issue_token(&self, admin: &Admin) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.settings.auth.token_ttl_hours as i64);

        let claims = Claims {
            sub: admin.id,
            church_id: admin.church_id,
            role: admin.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
        )?;

        Ok((token, expires_at))
    }

    /// Verify a bearer token and build the request's auth context
    pub fn verify_token(&self, token: &str) -> Result<AuthContext> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(AuthContext::new(
            data.claims.sub,
            data.claims.church_id,
            data.claims.role,
        ))
    }

    /// Authenticate an admin and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        debug!(email = %request.email, "Login attempt");

        let admin = self
            .db
            .admins
            .find_by_login_email(&request.email)
            .await?
            .ok_or_else(|| ShepherdError::Authentication("Invalid credentials".to_string()))?;

        if !admin.is_active {
            warn!(admin_id = admin.id, "Login attempt on inactive account");
            return Err(ShepherdError::Authentication(
                "Account is disabled".to_string(),
            ));
        }

        if !Self::verify_password(&request.password, &admin.password_hash) {
            warn!(admin_id = admin.id, "Invalid password");
            return Err(ShepherdError::Authentication(
                "Invalid credentials".to_string(),
            ));
        }

        let (token, expires_at) = self.issue_token(&admin)?;
        self.db.admins.touch_last_login(admin.id).await?;

        info!(admin_id = admin.id, church_id = admin.church_id, "Admin logged in");

        Ok(LoginResponse {
            token,
            expires_at,
            admin_id: admin.id,
            church_id: admin.church_id,
            role: admin.role,
        })
    }

    /// Create an admin account within a church. When no password is supplied
    /// a temporary one is generated and returned exactly once.
    pub async fn create_admin(
        &self,
        church_id: i64,
        request: CreateAdminRequest,
    ) -> Result<AdminCreated> {
        let mut v = ValidationErrors::new();
        v.require("email", &request.email);
        if !request.email.trim().is_empty() {
            v.email("email", &request.email);
        }
        v.require("full_name", &request.full_name);
        v.max_length("full_name", &request.full_name, 200);
        if let Some(ref password) = request.password {
            if password.len() < 8 {
                v.add("password", "password must be at least 8 characters");
            }
        }
        v.into_result()?;

        if self
            .db
            .admins
            .find_by_email(church_id, &request.email)
            .await?
            .is_some()
        {
            return Err(ShepherdError::InvalidInput(format!(
                "Admin with email {} already exists",
                request.email
            )));
        }

        let (password, temporary) = match request.password {
            Some(p) => (p, None),
            None => {
                let generated = generate_random_string(16);
                (generated.clone(), Some(generated))
            }
        };
        let password_hash = Self::hash_password(&password)?;

        let admin = self
            .db
            .admins
            .create(
                church_id,
                &request.email,
                &request.full_name,
                &password_hash,
                request.role.unwrap_or(AdminRole::Staff),
            )
            .await?;

        info!(admin_id = admin.id, church_id = church_id, role = %admin.role, "Admin account created");

        Ok(AdminCreated {
            admin,
            temporary_password: temporary,
        })
    }

    /// List admin accounts of a church
    pub async fn list_admins(&self, church_id: i64) -> Result<Vec<Admin>> {
        self.db.admins.list(church_id).await
    }

    /// Update an admin account
    pub async fn update_admin(
        &self,
        church_id: i64,
        admin_id: i64,
        request: crate::models::admin::UpdateAdminRequest,
    ) -> Result<Admin> {
        let mut v = ValidationErrors::new();
        if let Some(ref full_name) = request.full_name {
            v.require("full_name", full_name);
            v.max_length("full_name", full_name, 200);
        }
        v.into_result()?;

        let admin = self
            .db
            .admins
            .update(church_id, admin_id, request)
            .await?
            .ok_or_else(|| {
                ShepherdError::InvalidInput(format!("Admin not found: {}", admin_id))
            })?;

        info!(church_id = church_id, admin_id = admin_id, "Admin account updated");
        Ok(admin)
    }

    /// Delete an admin account
    pub async fn delete_admin(&self, church_id: i64, admin_id: i64) -> Result<()> {
        let removed = self.db.admins.delete(church_id, admin_id).await?;
        if !removed {
            return Err(ShepherdError::InvalidInput(format!(
                "Admin not found: {}",
                admin_id
            )));
        }

        info!(church_id = church_id, admin_id = admin_id, "Admin account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = AuthService::hash_password("a strong passphrase").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(AuthService::verify_password("a strong passphrase", &hash));
        assert!(!AuthService::verify_password("wrong", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!AuthService::verify_password("whatever", "not-a-hash"));
    }

    #[test]
    fn test_role_permissions() {
        assert!(AdminRole::Staff.permissions().contains(&Permission::ViewRecords));
        assert!(!AdminRole::Staff.permissions().contains(&Permission::ManageRecords));
        assert!(AdminRole::DepartmentLead
            .permissions()
            .contains(&Permission::ManageRecords));
        assert!(AdminRole::ChurchAdmin
            .permissions()
            .contains(&Permission::ManageTenant));
        assert!(!AdminRole::ChurchAdmin
            .permissions()
            .contains(&Permission::ManagePlatform));
        assert!(AdminRole::SuperAdmin
            .permissions()
            .contains(&Permission::ManagePlatform));
    }

    #[test]
    fn test_auth_context_require() {
        let ctx = AuthContext::new(1, 1, AdminRole::Staff);
        assert!(ctx.require(Permission::ViewRecords).is_ok());
        assert!(ctx.require(Permission::ManageRecords).is_err());
    }
}
