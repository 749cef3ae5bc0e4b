//! Administrator account repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::admin::{Admin, AdminRole, UpdateAdminRequest};
use crate::utils::errors::ShepherdError;

const ADMIN_COLUMNS: &str = "id, church_id, email, full_name, password_hash, role, is_active, last_login_at, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new admin account
    pub async fn create(
        &self,
        church_id: i64,
        email: &str,
        full_name: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<Admin, ShepherdError> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (church_id, email, full_name, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, church_id, email, full_name, password_hash, role, is_active, last_login_at, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(email)
        .bind(full_name)
        .bind(password_hash)
        .bind(role)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Find admin by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, ShepherdError> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Find admin by email within a church
    pub async fn find_by_email(
        &self,
        church_id: i64,
        email: &str,
    ) -> Result<Option<Admin>, ShepherdError> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE church_id = $1 AND email = $2"
        ))
        .bind(church_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Find admin by email across all churches (login)
    pub async fn find_by_login_email(&self, email: &str) -> Result<Option<Admin>, ShepherdError> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Update admin profile
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateAdminRequest,
    ) -> Result<Option<Admin>, ShepherdError> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            UPDATE admins
            SET full_name = COALESCE($3, full_name),
                role = COALESCE($4, role),
                is_active = COALESCE($5, is_active),
                updated_at = $6
            WHERE church_id = $1 AND id = $2
            RETURNING id, church_id, email, full_name, password_hash, role, is_active, last_login_at, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(id)
        .bind(request.full_name)
        .bind(request.role)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Record a successful login
    pub async fn touch_last_login(&self, id: i64) -> Result<(), ShepherdError> {
        sqlx::query("UPDATE admins SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List admins for a church
    pub async fn list(&self, church_id: i64) -> Result<Vec<Admin>, ShepherdError> {
        let admins = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE church_id = $1 ORDER BY created_at ASC"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(admins)
    }

    /// Delete admin; reports whether a row was actually removed
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query("DELETE FROM admins WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
