//! Payload validation behavior through the service layer
//!
//! An invalid payload must be rejected with field-level errors before any
//! storage is touched; a valid payload must get past validation. Both are
//! observable against an offline pool: validation failures surface as
//! `Validation`, while valid payloads fail later with a database error.

mod helpers;

use assert_matches::assert_matches;

use helpers::{lazy_pool, test_data::member_payload};
use shepherd::database::DatabaseService;
use shepherd::services::MemberService;
use shepherd::utils::errors::ShepherdError;

fn member_service() -> MemberService {
    MemberService::new(DatabaseService::new(lazy_pool()))
}

#[tokio::test]
async fn test_missing_required_field_blocks_mutation() {
    let service = member_service();

    let mut payload = member_payload();
    payload.first_name = "   ".to_string();

    let err = service.create(1, payload).await.unwrap_err();
    assert_matches!(err, ShepherdError::Validation(errors) => {
        assert!(errors.errors.iter().any(|e| e.field == "first_name"));
    });
}

#[tokio::test]
async fn test_invalid_email_blocks_mutation() {
    let service = member_service();

    let mut payload = member_payload();
    payload.email = Some("not-an-email".to_string());

    let err = service.create(1, payload).await.unwrap_err();
    assert_matches!(err, ShepherdError::Validation(_));
}

#[tokio::test]
async fn test_valid_payload_reaches_storage() {
    let service = member_service();

    // With an offline pool a valid payload must fail at the database layer,
    // not at validation.
    let err = service.create(1, member_payload()).await.unwrap_err();
    assert_matches!(err, ShepherdError::Database(_));
}

#[tokio::test]
async fn test_search_shorter_than_two_chars_rejected() {
    let service = member_service();

    let filter = shepherd::models::member::MemberFilter {
        search: Some("a".to_string()),
        status: None,
    };
    let err = service
        .list(1, filter, shepherd::models::Pagination::default())
        .await
        .unwrap_err();

    assert_matches!(err, ShepherdError::InvalidInput(_));
}

#[tokio::test]
async fn test_oversized_limit_rejected() {
    let service = member_service();

    let err = service
        .list(
            1,
            Default::default(),
            shepherd::models::Pagination { page: 1, limit: 500 },
        )
        .await
        .unwrap_err();

    assert_matches!(err, ShepherdError::InvalidInput(_));
}
