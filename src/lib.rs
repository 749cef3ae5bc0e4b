//! Shepherd church management platform
//!
//! A multi-tenant backend for church administration: members, departments,
//! small groups, discipleship tracking, prayer requests, volunteers, and
//! communications, exposed over a JSON/HTTP API.

pub mod api;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, ShepherdError};

// Re-export main components for easy access
pub use api::{build_router, AppState};
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
