//! Test settings and payload builders

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use sqlx::postgres::PgPoolOptions;

use shepherd::config::Settings;
use shepherd::database::DatabasePool;
use shepherd::models::member::CreateMemberRequest;

/// Settings wired for tests: valid secret, gateway pointed at `gateway_url`
pub fn test_settings(gateway_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "test-secret-test-secret-test-secret!".to_string();
    settings.gateway.url = gateway_url.to_string();
    settings.gateway.timeout_seconds = 2;
    settings.gateway.enabled = true;
    settings
}

/// Connection pool that never actually connects. Good enough for code paths
/// that fail before touching the database.
pub fn lazy_pool() -> DatabasePool {
    PgPoolOptions::new()
        .connect_lazy("postgresql://localhost:1/shepherd_test_offline")
        .expect("lazy pool construction should not fail")
}

/// Valid member creation payload with generated identity
pub fn member_payload() -> CreateMemberRequest {
    CreateMemberRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: Some(SafeEmail().fake()),
        phone: None,
        address: None,
        status: None,
        joined_on: None,
        baptized_on: None,
        notes: None,
    }
}
