//! Communication repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::communication::{
    Announcement, Audience, DeliveryChannel, DeliveryStatus, Message, PublishAnnouncementRequest,
};
use crate::models::Pagination;
use crate::utils::errors::ShepherdError;

const MESSAGE_COLUMNS: &str = "id, church_id, sender_admin_id, recipient_member_id, channel, subject, body, status, failure_reason, sent_at, created_at";
const ANNOUNCEMENT_COLUMNS: &str = "id, church_id, author_admin_id, title, body, audience, channel, published_at, sent_count, failed_count, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct CommunicationRepository {
    pool: PgPool,
}

impl CommunicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an outbound message in `pending` state
    pub async fn create_message(
        &self,
        church_id: i64,
        sender_admin_id: i64,
        recipient_member_id: i64,
        channel: DeliveryChannel,
        subject: Option<&str>,
        body: &str,
    ) -> Result<Message, ShepherdError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (church_id, sender_admin_id, recipient_member_id, channel, subject, body, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, church_id, sender_admin_id, recipient_member_id, channel, subject, body, status, failure_reason, sent_at, created_at
            "#,
        )
        .bind(church_id)
        .bind(sender_admin_id)
        .bind(recipient_member_id)
        .bind(channel)
        .bind(subject)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    /// Record the single delivery attempt's outcome
    pub async fn mark_message_outcome(
        &self,
        id: i64,
        status: DeliveryStatus,
        failure_reason: Option<&str>,
    ) -> Result<Option<Message>, ShepherdError> {
        let sent_at = if status == DeliveryStatus::Sent {
            Some(Utc::now())
        } else {
            None
        };

        let message = sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages
            SET status = $2, failure_reason = $3, sent_at = $4
            WHERE id = $1
            RETURNING id, church_id, sender_admin_id, recipient_member_id, channel, subject, body, status, failure_reason, sent_at, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(failure_reason)
        .bind(sent_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    /// Find message by ID within a church
    pub async fn find_message(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Message>, ShepherdError> {
        let message = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    /// List messages newest first
    pub async fn list_messages(
        &self,
        church_id: i64,
        status: Option<DeliveryStatus>,
        pagination: Pagination,
    ) -> Result<Vec<Message>, ShepherdError> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE church_id = $1
              AND ($2::delivery_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(status)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Count messages matching the same filter as `list_messages`
    pub async fn count_messages(
        &self,
        church_id: i64,
        status: Option<DeliveryStatus>,
    ) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE church_id = $1
              AND ($2::delivery_status IS NULL OR status = $2)
            "#,
        )
        .bind(church_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Sent/failed message totals for a church
    pub async fn message_outcome_counts(&self, church_id: i64) -> Result<(i64, i64), ShepherdError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE status = 'sent'),
                   COUNT(*) FILTER (WHERE status = 'failed')
            FROM messages WHERE church_id = $1
            "#,
        )
        .bind(church_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Create an announcement ahead of delivery
    pub async fn create_announcement(
        &self,
        church_id: i64,
        author_admin_id: i64,
        request: &PublishAnnouncementRequest,
    ) -> Result<Announcement, ShepherdError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (church_id, author_admin_id, title, body, audience, channel, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, church_id, author_admin_id, title, body, audience, channel, published_at, sent_count, failed_count, created_at, updated_at
            "#,
        )
        .bind(church_id)
        .bind(author_admin_id)
        .bind(&request.title)
        .bind(&request.body)
        .bind(request.audience)
        .bind(request.channel)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Record the delivery fan-out result and stamp publication
    pub async fn mark_announcement_published(
        &self,
        id: i64,
        sent_count: i32,
        failed_count: i32,
    ) -> Result<Option<Announcement>, ShepherdError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            UPDATE announcements
            SET published_at = $2, sent_count = $3, failed_count = $4, updated_at = $2
            WHERE id = $1
            RETURNING id, church_id, author_admin_id, title, body, audience, channel, published_at, sent_count, failed_count, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .bind(sent_count)
        .bind(failed_count)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Find announcement by ID within a church
    pub async fn find_announcement(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Announcement>, ShepherdError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// List announcements newest first
    pub async fn list_announcements(
        &self,
        church_id: i64,
        audience: Option<Audience>,
        pagination: Pagination,
    ) -> Result<Vec<Announcement>, ShepherdError> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
            WHERE church_id = $1
              AND ($2::announcement_audience IS NULL OR audience = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(audience)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }

    /// Count announcements matching the same filter as `list_announcements`
    pub async fn count_announcements(
        &self,
        church_id: i64,
        audience: Option<Audience>,
    ) -> Result<i64, ShepherdError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM announcements
            WHERE church_id = $1
              AND ($2::announcement_audience IS NULL OR audience = $2)
            "#,
        )
        .bind(church_id)
        .bind(audience)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Delete an announcement that was never published
    pub async fn delete_announcement(&self, church_id: i64, id: i64) -> Result<bool, ShepherdError> {
        let result = sqlx::query(
            "DELETE FROM announcements WHERE church_id = $1 AND id = $2 AND published_at IS NULL",
        )
        .bind(church_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
