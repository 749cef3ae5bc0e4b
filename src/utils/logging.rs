//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Shepherd application.

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "shepherd.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log admin actions with structured data
pub fn log_admin_action(admin_id: i64, church_id: i64, action: &str, target: Option<&str>) {
    info!(
        admin_id = admin_id,
        church_id = church_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log delivery attempts against the messaging gateway
pub fn log_delivery(message_id: i64, channel: &str, success: bool, reason: Option<&str>) {
    if success {
        debug!(message_id = message_id, channel = channel, "Delivery succeeded");
    } else {
        warn!(
            message_id = message_id,
            channel = channel,
            reason = reason,
            "Delivery failed"
        );
    }
}

