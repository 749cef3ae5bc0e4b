//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::require_auth;
pub use logging::log_requests;
pub use rate_limit::{RateLimitConfig, RateLimiter};
