//! Delivery gateway service implementation
//!
//! This service handles the outbound email/SMS gateway integration,
//! including HTTP client setup, response parsing, and error handling.
//! Each send is a single attempt; callers record the outcome and never
//! retry automatically.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::models::communication::DeliveryChannel;
use crate::utils::errors::{GatewayError, Result, ShepherdError};

/// Outbound delivery request posted to the gateway
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryRequest {
    pub request_id: Uuid,
    pub channel: DeliveryChannel,
    pub to: String,
    pub subject: Option<String>,
    pub body: String,
}

/// Gateway response structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayResponse {
    pub accepted: bool,
    pub provider_id: Option<String>,
    pub error: Option<String>,
}

/// Outcome of one delivery attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub request_id: Uuid,
    pub accepted: bool,
    pub provider_id: Option<String>,
    pub error: Option<String>,
    pub attempted_at: chrono::DateTime<chrono::Utc>,
}

/// HTTP client for the delivery gateway
#[derive(Debug, Clone)]
pub struct GatewayService {
    client: Client,
    settings: Settings,
}

impl GatewayService {
    /// Create a new GatewayService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.gateway.timeout_seconds))
            .user_agent("Shepherd/0.1")
            .build()
            .map_err(ShepherdError::Http)?;

        Ok(Self { client, settings })
    }

    /// Whether delivery is enabled at all
    pub fn is_enabled(&self) -> bool {
        self.settings.gateway.enabled
    }

    /// Deliver one message through the gateway. Exactly one HTTP attempt.
    pub async fn deliver(
        &self,
        channel: DeliveryChannel,
        to: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<DeliveryOutcome> {
        if !self.is_enabled() {
            return Err(ShepherdError::Gateway(GatewayError::ServiceUnavailable));
        }

        let request = DeliveryRequest {
            request_id: Uuid::new_v4(),
            channel,
            to: to.to_string(),
            subject: subject.map(|s| s.to_string()),
            body: body.to_string(),
        };

        debug!(
            request_id = %request.request_id,
            channel = %channel,
            "Posting delivery request to gateway"
        );

        let response = self
            .client
            .post(&self.settings.gateway.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ShepherdError::Gateway(GatewayError::Timeout)
                } else if e.is_connect() {
                    ShepherdError::Gateway(GatewayError::ServiceUnavailable)
                } else {
                    ShepherdError::Gateway(GatewayError::RequestFailed(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShepherdError::Gateway(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            ))));
        }

        let gateway_response: GatewayResponse = response
            .json()
            .await
            .map_err(|e| ShepherdError::Gateway(GatewayError::InvalidResponse(e.to_string())))?;

        if !gateway_response.accepted {
            warn!(
                request_id = %request.request_id,
                error = ?gateway_response.error,
                "Gateway rejected delivery"
            );
        }

        Ok(DeliveryOutcome {
            request_id: request.request_id,
            accepted: gateway_response.accepted,
            provider_id: gateway_response.provider_id,
            error: gateway_response.error,
            attempted_at: chrono::Utc::now(),
        })
    }
}
