//! Communication models: direct messages and announcements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "delivery_channel", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    Email,
    Sms,
}

impl std::fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryChannel::Email => write!(f, "email"),
            DeliveryChannel::Sms => write!(f, "sms"),
        }
    }
}

/// Per-attempt delivery outcome. There are no retries; a failed message
/// stays failed until someone sends a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "delivery_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::Pending => write!(f, "pending"),
            DeliveryStatus::Sent => write!(f, "sent"),
            DeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Audience selector for announcements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "announcement_audience", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    All,
    Members,
    Volunteers,
    Leaders,
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::All => write!(f, "all"),
            Audience::Members => write!(f, "members"),
            Audience::Volunteers => write!(f, "volunteers"),
            Audience::Leaders => write!(f, "leaders"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub church_id: i64,
    pub sender_admin_id: i64,
    pub recipient_member_id: i64,
    pub channel: DeliveryChannel,
    pub subject: Option<String>,
    pub body: String,
    pub status: DeliveryStatus,
    pub failure_reason: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: i64,
    pub church_id: i64,
    pub author_admin_id: i64,
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub channel: DeliveryChannel,
    pub published_at: Option<DateTime<Utc>>,
    pub sent_count: i32,
    pub failed_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_member_id: i64,
    pub channel: DeliveryChannel,
    pub subject: Option<String>,
    /// Either a literal body or a template key plus parameters
    pub body: Option<String>,
    pub template: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishAnnouncementRequest {
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub channel: DeliveryChannel,
}

/// Running totals of delivery outcomes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub total_sent: u64,
    pub total_failed: u64,
    pub sent_by_channel: HashMap<String, u64>,
    pub sent_by_template: HashMap<String, u64>,
}
