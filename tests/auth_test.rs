//! Token lifecycle tests
//!
//! Issue/verify never touch the database, so these run against an offline
//! pool.

mod helpers;

use chrono::Utc;

use helpers::{lazy_pool, test_settings};
use shepherd::database::DatabaseService;
use shepherd::models::admin::{Admin, AdminRole};
use shepherd::services::auth::Permission;
use shepherd::services::AuthService;

fn auth_service(secret_override: Option<&str>) -> AuthService {
    let mut settings = test_settings("https://gateway.example.org/v1/deliver");
    if let Some(secret) = secret_override {
        settings.auth.jwt_secret = secret.to_string();
    }
    AuthService::new(DatabaseService::new(lazy_pool()), settings)
}

fn admin(role: AdminRole) -> Admin {
    Admin {
        id: 7,
        church_id: 3,
        email: "pastor@gracechapel.org".to_string(),
        full_name: "Pastor Jane Doe".to_string(),
        password_hash: String::new(),
        role,
        is_active: true,
        last_login_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_token_roundtrip() {
    let service = auth_service(None);
    let admin = admin(AdminRole::ChurchAdmin);

    let (token, expires_at) = service.issue_token(&admin).unwrap();
    assert!(expires_at > Utc::now());

    let context = service.verify_token(&token).unwrap();
    assert_eq!(context.admin_id, 7);
    assert_eq!(context.church_id, 3);
    assert_eq!(context.role, AdminRole::ChurchAdmin);
    assert!(context.permissions.contains(&Permission::ManageTenant));
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let service = auth_service(None);
    let (token, _) = service.issue_token(&admin(AdminRole::Staff)).unwrap();

    let mut tampered = token.clone();
    tampered.push('x');

    assert!(service.verify_token(&tampered).is_err());
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let issuing = auth_service(Some("first-secret-first-secret-first-sec"));
    let verifying = auth_service(Some("other-secret-other-secret-other-sec"));

    let (token, _) = issuing.issue_token(&admin(AdminRole::Staff)).unwrap();
    assert!(verifying.verify_token(&token).is_err());
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let service = auth_service(None);
    assert!(service.verify_token("not.a.token").is_err());
}
