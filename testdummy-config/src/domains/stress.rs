//! CPU stress configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// CPU stress applied by the ping endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StressConfig {
    /// How long each ping saturates the CPU; zero disables stress
    #[serde(with = "crate::domains::utils::serde_humantime")]
    pub cpu_duration: Duration,

    /// Busy-loop worker count; defaults to the hardware parallelism
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Validatable for StressConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(workers) = self.workers {
            validate_positive(workers, "workers", self.domain_name())?;
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "stress"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_disabled_by_default() {
        let config = StressConfig::default();
        assert!(config.cpu_duration.is_zero());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = StressConfig {
            cpu_duration: Duration::from_millis(10),
            workers: Some(0),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_deserializes_from_string() {
        let config: StressConfig =
            serde_yaml::from_str("cpu_duration: 250ms\nworkers: 2\n").unwrap();
        assert_eq!(config.cpu_duration, Duration::from_millis(250));
        assert_eq!(config.workers, Some(2));
    }
}
