//! Mock delivery gateway backed by wiremock

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wiremock stand-in for the outbound delivery gateway
pub struct GatewayMockServer {
    server: MockServer,
}

impl GatewayMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Gateway URL to point the service at
    pub fn url(&self) -> String {
        format!("{}/v1/deliver", self.server.uri())
    }

    /// Accept every delivery
    pub async fn accept_all(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/deliver"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accepted": true,
                "provider_id": "prov-123",
                "error": null
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject every delivery at the application level
    pub async fn reject_all(&self, reason: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/deliver"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accepted": false,
                "provider_id": null,
                "error": reason
            })))
            .mount(&self.server)
            .await;
    }

    /// Fail every delivery with an HTTP error
    pub async fn fail_all(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/v1/deliver"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Answer with a body the client cannot parse
    pub async fn garbage_response(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/deliver"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the gateway received
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|reqs| reqs.len())
            .unwrap_or(0)
    }
}
