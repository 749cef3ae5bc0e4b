//! Rate limiting middleware
//!
//! Sliding-window rate limiting with a small burst allowance, keyed by the
//! authenticated account. Exceeding the limit is surfaced as HTTP 429.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::services::auth::AuthContext;
use crate::utils::errors::{Result, ShepherdError};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_duration: Duration::from_secs(60),
            burst_allowance: 10,
        }
    }
}

/// Rate limit entry for tracking account requests
#[derive(Debug, Clone)]
struct RateLimitEntry {
    requests: Vec<Instant>,
    burst_used: u32,
    last_reset: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            burst_used: 0,
            last_reset: Instant::now(),
        }
    }

    /// Clean up old requests outside the window
    fn cleanup(&mut self, window_duration: Duration) {
        let cutoff = Instant::now() - window_duration;
        self.requests.retain(|&time| time > cutoff);

        if self.last_reset.elapsed() > window_duration {
            self.burst_used = 0;
            self.last_reset = Instant::now();
        }
    }

    /// Check if request is allowed
    fn is_allowed(&mut self, config: &RateLimitConfig) -> bool {
        self.cleanup(config.window_duration);

        let current_requests = self.requests.len() as u32;

        if current_requests < config.max_requests {
            return true;
        }

        if self.burst_used < config.burst_allowance {
            self.burst_used += 1;
            return true;
        }

        false
    }

    fn record(&mut self) {
        self.requests.push(Instant::now());
    }
}

/// Shared rate limiter keyed by account
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimiter {
    /// Create a new RateLimiter instance
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check and record one request for a key
    pub fn check(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("rate limiter lock poisoned");
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(RateLimitEntry::new);

        if entry.is_allowed(&self.config) {
            entry.record();
            debug!(key = key, requests = entry.requests.len(), "Request allowed");
            Ok(())
        } else {
            warn!(key = key, "Rate limit exceeded");
            Err(ShepherdError::RateLimitExceeded)
        }
    }

    /// Number of tracked keys (for diagnostics)
    pub fn tracked_keys(&self) -> usize {
        self.entries.lock().expect("rate limiter lock poisoned").len()
    }
}

/// Axum middleware enforcing the per-account rate limit
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> std::result::Result<Response, ApiError> {
    let key = request
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| format!("admin:{}", ctx.admin_id))
        .unwrap_or_else(|| "anonymous".to_string());

    state.rate_limiter.check(&key)?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_config() -> RateLimitConfig {
        RateLimitConfig {
            max_requests: 2,
            window_duration: Duration::from_secs(60),
            burst_allowance: 1,
        }
    }

    #[test]
    fn test_allows_within_limit() {
        let limiter = RateLimiter::new(tight_config());
        assert!(limiter.check("admin:1").is_ok());
        assert!(limiter.check("admin:1").is_ok());
    }

    #[test]
    fn test_burst_then_reject() {
        let limiter = RateLimiter::new(tight_config());
        assert!(limiter.check("admin:1").is_ok());
        assert!(limiter.check("admin:1").is_ok());
        // Burst allowance covers one extra request
        assert!(limiter.check("admin:1").is_ok());
        assert!(matches!(
            limiter.check("admin:1"),
            Err(ShepherdError::RateLimitExceeded)
        ));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(tight_config());
        assert!(limiter.check("admin:1").is_ok());
        assert!(limiter.check("admin:1").is_ok());
        assert!(limiter.check("admin:2").is_ok());
        assert_eq!(limiter.tracked_keys(), 2);
    }
}
