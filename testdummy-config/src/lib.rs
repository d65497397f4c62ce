//! Domain-driven configuration management for TestDummy
//!
//! Configuration is split by functional domain. Every domain has serde
//! defaults, so an empty environment yields a working service, and every
//! value can be overridden through `TESTDUMMY_*` environment variables.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, ENV_PREFIX};

// Re-export domain configurations
pub use domains::{
    faults::FaultConfig, healthcheck::HealthcheckConfig, logging::LoggingConfig,
    server::ServerConfig, stress::StressConfig, TestDummyConfig,
};

// Re-export utilities
pub use domains::utils::{parse_bool, parse_duration, serde_humantime};
