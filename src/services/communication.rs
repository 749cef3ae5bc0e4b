//! Communication service implementation
//!
//! This service handles message formatting and sending: template
//! substitution, direct member messages, audience-wide announcements, and
//! delivery statistics. Every delivery is a single gateway attempt whose
//! outcome is recorded on the message row.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::models::communication::{
    Announcement, Audience, DeliveryChannel, DeliveryStats, DeliveryStatus, Message,
    PublishAnnouncementRequest, SendMessageRequest,
};
use crate::models::member::Member;
use crate::models::{Paged, Pagination};
use crate::services::check_pagination;
use crate::services::gateway::GatewayService;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::validation::ValidationErrors;

/// Message template structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub key: String,
    pub subject: Option<String>,
    pub body: String,
}

/// Communication service for outbound messaging
#[derive(Clone)]
pub struct CommunicationService {
    db: DatabaseService,
    gateway: GatewayService,
    settings: Settings,
    templates: HashMap<String, MessageTemplate>,
    stats: Arc<Mutex<DeliveryStats>>,
}

impl CommunicationService {
    /// Create a new CommunicationService instance
    pub fn new(db: DatabaseService, gateway: GatewayService, settings: Settings) -> Self {
        Self {
            db,
            gateway,
            settings,
            templates: Self::load_default_templates(),
            stats: Arc::new(Mutex::new(DeliveryStats::default())),
        }
    }

    fn ensure_enabled(&self) -> Result<()> {
        if !self.settings.features.communications {
            return Err(ShepherdError::ServiceUnavailable(
                "Communications are disabled for this installation".to_string(),
            ));
        }
        Ok(())
    }

    /// Send a direct message to one member
    pub async fn send_message(
        &self,
        church_id: i64,
        sender_admin_id: i64,
        request: SendMessageRequest,
    ) -> Result<Message> {
        self.ensure_enabled()?;

        let (subject, body, template_key) = self.resolve_content(&request)?;

        let member = self
            .db
            .members
            .find_by_id(church_id, request.recipient_member_id)
            .await?
            .ok_or(ShepherdError::MemberNotFound {
                member_id: request.recipient_member_id,
            })?;

        let contact = contact_for_channel(&member, request.channel).ok_or_else(|| {
            ShepherdError::InvalidInput(format!(
                "Member {} has no {} contact on file",
                member.id, request.channel
            ))
        })?;

        let message = self
            .db
            .communications
            .create_message(
                church_id,
                sender_admin_id,
                member.id,
                request.channel,
                subject.as_deref(),
                &body,
            )
            .await?;

        debug!(message_id = message.id, channel = %request.channel, "Delivering message");

        let (status, failure_reason) = match self
            .gateway
            .deliver(request.channel, &contact, subject.as_deref(), &body)
            .await
        {
            Ok(outcome) if outcome.accepted => (DeliveryStatus::Sent, None),
            Ok(outcome) => (
                DeliveryStatus::Failed,
                Some(outcome.error.unwrap_or_else(|| "rejected by gateway".to_string())),
            ),
            Err(e) => (DeliveryStatus::Failed, Some(e.to_string())),
        };

        self.record_outcome(status, request.channel, template_key.as_deref());

        let message = self
            .db
            .communications
            .mark_message_outcome(message.id, status, failure_reason.as_deref())
            .await?
            .unwrap_or(message);

        crate::utils::logging::log_delivery(
            message.id,
            &request.channel.to_string(),
            status == DeliveryStatus::Sent,
            message.failure_reason.as_deref(),
        );

        Ok(message)
    }

    /// Publish an announcement to its audience, one delivery per recipient
    pub async fn publish_announcement(
        &self,
        church_id: i64,
        author_admin_id: i64,
        request: PublishAnnouncementRequest,
    ) -> Result<Announcement> {
        self.ensure_enabled()?;

        let mut v = ValidationErrors::new();
        v.require("title", &request.title);
        v.max_length("title", &request.title, 200);
        v.require("body", &request.body);
        v.into_result()?;

        let announcement = self
            .db
            .communications
            .create_announcement(church_id, author_admin_id, &request)
            .await?;

        let recipients = self.audience_members(church_id, request.audience).await?;
        info!(
            announcement_id = announcement.id,
            audience = %request.audience,
            recipients = recipients.len(),
            "Publishing announcement"
        );

        let mut sent = 0i32;
        let mut failed = 0i32;

        for member in &recipients {
            let Some(contact) = contact_for_channel(member, request.channel) else {
                warn!(member_id = member.id, channel = %request.channel, "No contact on file, skipping");
                failed += 1;
                continue;
            };

            match self
                .gateway
                .deliver(request.channel, &contact, Some(&request.title), &request.body)
                .await
            {
                Ok(outcome) if outcome.accepted => {
                    self.record_outcome(DeliveryStatus::Sent, request.channel, None);
                    sent += 1;
                }
                Ok(_) | Err(_) => {
                    self.record_outcome(DeliveryStatus::Failed, request.channel, None);
                    failed += 1;
                }
            }

            // Small delay between sends to avoid flooding the gateway
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        let announcement = self
            .db
            .communications
            .mark_announcement_published(announcement.id, sent, failed)
            .await?
            .unwrap_or(announcement);

        info!(
            announcement_id = announcement.id,
            sent = sent,
            failed = failed,
            "Announcement published"
        );
        Ok(announcement)
    }

    /// List messages newest first
    pub async fn list_messages(
        &self,
        church_id: i64,
        status: Option<DeliveryStatus>,
        pagination: Pagination,
    ) -> Result<Paged<Message>> {
        check_pagination(&pagination)?;

        let (items, total) = futures::try_join!(
            self.db.communications.list_messages(church_id, status, pagination),
            self.db.communications.count_messages(church_id, status),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// List announcements newest first
    pub async fn list_announcements(
        &self,
        church_id: i64,
        audience: Option<Audience>,
        pagination: Pagination,
    ) -> Result<Paged<Announcement>> {
        check_pagination(&pagination)?;

        let (items, total) = futures::try_join!(
            self.db
                .communications
                .list_announcements(church_id, audience, pagination),
            self.db.communications.count_announcements(church_id, audience),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Delete an announcement that was never published
    pub async fn delete_announcement(&self, church_id: i64, announcement_id: i64) -> Result<()> {
        let removed = self
            .db
            .communications
            .delete_announcement(church_id, announcement_id)
            .await?;
        if !removed {
            return Err(ShepherdError::InvalidInput(format!(
                "Announcement {} does not exist or is already published",
                announcement_id
            )));
        }

        info!(church_id = church_id, announcement_id = announcement_id, "Announcement deleted");
        Ok(())
    }

    /// Members selected by an announcement audience
    async fn audience_members(&self, church_id: i64, audience: Audience) -> Result<Vec<Member>> {
        match audience {
            Audience::All => self.db.members.list_all(church_id).await,
            Audience::Members => self.db.members.list_active(church_id).await,
            Audience::Volunteers => {
                let ids = self.db.volunteers.active_member_ids(church_id).await?;
                self.db.members.list_by_ids(church_id, &ids).await
            }
            Audience::Leaders => self.db.members.list_leaders(church_id).await,
        }
    }

    /// Resolve message content from a literal body or a template
    fn resolve_content(
        &self,
        request: &SendMessageRequest,
    ) -> Result<(Option<String>, String, Option<String>)> {
        match (&request.template, &request.body) {
            (Some(key), _) => {
                let template = self.templates.get(key).ok_or_else(|| {
                    ShepherdError::InvalidInput(format!("Template not found: {}", key))
                })?;

                let subject = request
                    .subject
                    .clone()
                    .or_else(|| template.subject.clone());
                let body = format_template(&template.body, &request.parameters);
                Ok((subject, body, Some(key.clone())))
            }
            (None, Some(body)) => {
                let mut v = ValidationErrors::new();
                v.require("body", body);
                v.into_result()?;
                Ok((request.subject.clone(), body.clone(), None))
            }
            (None, None) => {
                let mut v = ValidationErrors::new();
                v.add("body", "either body or template is required");
                Err(ShepherdError::Validation(v))
            }
        }
    }

    fn record_outcome(
        &self,
        status: DeliveryStatus,
        channel: DeliveryChannel,
        template_key: Option<&str>,
    ) {
        let mut stats = self.stats.lock().expect("delivery stats lock poisoned");
        match status {
            DeliveryStatus::Sent => {
                stats.total_sent += 1;
                *stats.sent_by_channel.entry(channel.to_string()).or_insert(0) += 1;
                if let Some(key) = template_key {
                    *stats.sent_by_template.entry(key.to_string()).or_insert(0) += 1;
                }
            }
            DeliveryStatus::Failed => {
                stats.total_failed += 1;
            }
            DeliveryStatus::Pending => {}
        }
    }

    /// Snapshot of delivery statistics
    pub fn stats(&self) -> DeliveryStats {
        self.stats.lock().expect("delivery stats lock poisoned").clone()
    }

    /// Available template keys
    pub fn template_keys(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    /// Load default message templates
    fn load_default_templates() -> HashMap<String, MessageTemplate> {
        let mut templates = HashMap::new();

        templates.insert(
            "welcome".to_string(),
            MessageTemplate {
                key: "welcome".to_string(),
                subject: Some("Welcome to {church_name}".to_string()),
                body: "Dear {first_name},\n\nWelcome to the {church_name} family! We are glad you are here.\n\nBlessings,\n{church_name}".to_string(),
            },
        );

        templates.insert(
            "service_reminder".to_string(),
            MessageTemplate {
                key: "service_reminder".to_string(),
                subject: Some("Service reminder".to_string()),
                body: "Dear {first_name},\n\nThis is a reminder that {service_name} starts at {service_time}. We look forward to seeing you.".to_string(),
            },
        );

        templates.insert(
            "volunteer_schedule".to_string(),
            MessageTemplate {
                key: "volunteer_schedule".to_string(),
                subject: Some("Your serving schedule".to_string()),
                body: "Dear {first_name},\n\nYou are scheduled to serve with {department_name} on {serve_date}. Thank you for serving!".to_string(),
            },
        );

        templates
    }
}

/// Contact address of a member for a channel, if on file
fn contact_for_channel(member: &Member, channel: DeliveryChannel) -> Option<String> {
    match channel {
        DeliveryChannel::Email => member.email.clone(),
        DeliveryChannel::Sms => member.phone.clone(),
    }
}

/// Replace `{key}` placeholders with parameter values
fn format_template(template: &str, parameters: &HashMap<String, String>) -> String {
    let mut formatted = template.to_string();

    for (key, value) in parameters {
        let placeholder = format!("{{{}}}", key);
        formatted = formatted.replace(&placeholder, value);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::member::MembershipStatus;

    fn member(email: Option<&str>, phone: Option<&str>) -> Member {
        Member {
            id: 1,
            church_id: 1,
            first_name: "Amos".to_string(),
            last_name: "Banda".to_string(),
            email: email.map(|s| s.to_string()),
            phone: phone.map(|s| s.to_string()),
            address: None,
            status: MembershipStatus::Active,
            joined_on: None,
            baptized_on: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_template() {
        let mut parameters = HashMap::new();
        parameters.insert("first_name".to_string(), "Amos".to_string());
        parameters.insert("church_name".to_string(), "Grace Chapel".to_string());

        let result = format_template("Dear {first_name}, welcome to {church_name}!", &parameters);
        assert_eq!(result, "Dear Amos, welcome to Grace Chapel!");
    }

    #[test]
    fn test_format_template_leaves_unknown_placeholders() {
        let parameters = HashMap::new();
        let result = format_template("Hello {first_name}", &parameters);
        assert_eq!(result, "Hello {first_name}");
    }

    #[test]
    fn test_contact_for_channel() {
        let m = member(Some("amos@example.org"), None);
        assert_eq!(
            contact_for_channel(&m, DeliveryChannel::Email).as_deref(),
            Some("amos@example.org")
        );
        assert!(contact_for_channel(&m, DeliveryChannel::Sms).is_none());
    }

    #[test]
    fn test_default_templates_present() {
        let templates = CommunicationService::load_default_templates();
        assert!(templates.contains_key("welcome"));
        assert!(templates.contains_key("service_reminder"));
        assert!(templates.contains_key("volunteer_schedule"));
    }
}
