//! Church repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::church::{Church, UpdateChurchRequest};
use crate::utils::errors::ShepherdError;

const CHURCH_COLUMNS: &str =
    "id, name, email, phone, address, timezone, settings, is_active, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ChurchRepository {
    pool: PgPool,
}

impl ChurchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new church tenant
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        address: Option<&str>,
        timezone: &str,
    ) -> Result<Church, ShepherdError> {
        let church = sqlx::query_as::<_, Church>(
            r#"
            INSERT INTO churches (name, email, phone, address, timezone, settings, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, address, timezone, settings, is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(timezone)
        .bind(serde_json::json!({}))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(church)
    }

    /// Find church by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Church>, ShepherdError> {
        let church = sqlx::query_as::<_, Church>(&format!(
            "SELECT {CHURCH_COLUMNS} FROM churches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(church)
    }

    /// Find church by contact email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Church>, ShepherdError> {
        let church = sqlx::query_as::<_, Church>(&format!(
            "SELECT {CHURCH_COLUMNS} FROM churches WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(church)
    }

    /// Update church profile
    pub async fn update(
        &self,
        id: i64,
        request: UpdateChurchRequest,
    ) -> Result<Option<Church>, ShepherdError> {
        let church = sqlx::query_as::<_, Church>(
            r#"
            UPDATE churches
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                timezone = COALESCE($6, timezone),
                updated_at = $7
            WHERE id = $1
            RETURNING id, name, email, phone, address, timezone, settings, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.address)
        .bind(request.timezone)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(church)
    }

    /// Replace the tenant preferences blob
    pub async fn update_settings(
        &self,
        id: i64,
        settings: serde_json::Value,
    ) -> Result<Option<Church>, ShepherdError> {
        let church = sqlx::query_as::<_, Church>(
            r#"
            UPDATE churches
            SET settings = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, name, email, phone, address, timezone, settings, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(settings)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(church)
    }

    /// List churches with pagination (platform administration)
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Church>, ShepherdError> {
        let churches = sqlx::query_as::<_, Church>(&format!(
            "SELECT {CHURCH_COLUMNS} FROM churches ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(churches)
    }

    /// Count total churches
    pub async fn count(&self) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM churches")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Activate or deactivate a tenant
    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<Option<Church>, ShepherdError> {
        let church = sqlx::query_as::<_, Church>(
            r#"
            UPDATE churches
            SET is_active = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, name, email, phone, address, timezone, settings, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(church)
    }
}
