use testdummy_config::domains::logging::{LogFormat, LogLevel};
use testdummy_config::LoggingConfig;
use testdummy_logging::init_logging_from_config;

#[test]
fn test_repeated_initialization_is_harmless() {
    let config = LoggingConfig {
        level: LogLevel::Debug,
        format: LogFormat::Json,
    };

    // The first call installs the subscriber, later ones are no-ops
    assert!(init_logging_from_config(&config).is_ok());
    assert!(init_logging_from_config(&LoggingConfig::default()).is_ok());

    tracing::info!(component = "logging-test", "subscriber installed");
}

#[test]
fn test_minimal_logging_config() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.format, LogFormat::Text);
}
