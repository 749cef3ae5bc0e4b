//! Delivery gateway integration tests
//!
//! Exercise the gateway client against a wiremock server: one HTTP attempt
//! per send, outcomes mapped faithfully, no retries.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use helpers::{test_settings, GatewayMockServer};
use shepherd::models::communication::DeliveryChannel;
use shepherd::services::GatewayService;
use shepherd::utils::errors::{GatewayError, ShepherdError};

#[tokio::test]
#[serial]
async fn test_accepted_delivery() {
    let mock = GatewayMockServer::new().await;
    mock.accept_all().await;

    let gateway = GatewayService::new(test_settings(&mock.url())).unwrap();
    let outcome = gateway
        .deliver(
            DeliveryChannel::Email,
            "ruth@example.org",
            Some("Welcome"),
            "Hello Ruth",
        )
        .await
        .unwrap();

    assert!(outcome.accepted);
    assert_eq!(outcome.provider_id.as_deref(), Some("prov-123"));
    assert_eq!(mock.request_count().await, 1);
}

#[tokio::test]
#[serial]
async fn test_rejected_delivery_is_not_an_error() {
    let mock = GatewayMockServer::new().await;
    mock.reject_all("unknown recipient").await;

    let gateway = GatewayService::new(test_settings(&mock.url())).unwrap();
    let outcome = gateway
        .deliver(DeliveryChannel::Sms, "+15550102233", None, "Hello")
        .await
        .unwrap();

    assert!(!outcome.accepted);
    assert_eq!(outcome.error.as_deref(), Some("unknown recipient"));
}

#[tokio::test]
#[serial]
async fn test_http_failure_maps_to_request_failed() {
    let mock = GatewayMockServer::new().await;
    mock.fail_all(500).await;

    let gateway = GatewayService::new(test_settings(&mock.url())).unwrap();
    let err = gateway
        .deliver(DeliveryChannel::Email, "ruth@example.org", None, "Hello")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ShepherdError::Gateway(GatewayError::RequestFailed(_))
    );
    // Exactly one attempt, no retry
    assert_eq!(mock.request_count().await, 1);
}

#[tokio::test]
#[serial]
async fn test_unparseable_response_maps_to_invalid_response() {
    let mock = GatewayMockServer::new().await;
    mock.garbage_response().await;

    let gateway = GatewayService::new(test_settings(&mock.url())).unwrap();
    let err = gateway
        .deliver(DeliveryChannel::Email, "ruth@example.org", None, "Hello")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ShepherdError::Gateway(GatewayError::InvalidResponse(_))
    );
}

#[tokio::test]
#[serial]
async fn test_disabled_gateway_refuses_to_send() {
    let mock = GatewayMockServer::new().await;
    mock.accept_all().await;

    let mut settings = test_settings(&mock.url());
    settings.gateway.enabled = false;

    let gateway = GatewayService::new(settings).unwrap();
    let err = gateway
        .deliver(DeliveryChannel::Email, "ruth@example.org", None, "Hello")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ShepherdError::Gateway(GatewayError::ServiceUnavailable)
    );
    assert_eq!(mock.request_count().await, 0);
}
