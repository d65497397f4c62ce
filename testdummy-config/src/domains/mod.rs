//! Domain-specific configuration modules

pub mod faults;
pub mod healthcheck;
pub mod logging;
pub mod server;
pub mod stress;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main TestDummy configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TestDummyConfig {
    /// Listener, routing and responder configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Initial health and scheduled faults
    #[serde(default)]
    pub faults: faults::FaultConfig,

    /// CPU stress configuration
    #[serde(default)]
    pub stress: stress::StressConfig,

    /// Aggregated dependency health checks
    #[serde(default)]
    pub healthcheck: healthcheck::HealthcheckConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl TestDummyConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.faults.validate()?;
        self.stress.validate()?;
        self.healthcheck.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
