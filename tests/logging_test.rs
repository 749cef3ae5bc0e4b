//! Logging initialization test
//!
//! Runs in its own test binary because the tracing registry can only be
//! installed once per process.

use tempfile::tempdir;

use shepherd::config::LoggingConfig;
use shepherd::utils::logging::init_logging;

#[test]
fn test_init_logging_with_file_appender() {
    let dir = tempdir().unwrap();

    let config = LoggingConfig {
        level: "info".to_string(),
        file_path: dir.path().to_string_lossy().into_owned(),
    };

    init_logging(&config).unwrap();
    tracing::info!("logging smoke test");
}
