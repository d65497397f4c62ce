//! Health and scheduled fault configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Initial health and one-shot faults armed at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    /// Health reported at startup, unless `healthy_after_seconds` is set
    #[serde(default = "crate::domains::utils::default_true")]
    pub healthy: bool,

    /// Start unhealthy and become healthy after this many seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy_after_seconds: Option<i64>,

    /// Crash the process after this many seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panic_seconds: Option<i64>,
}

impl FaultConfig {
    /// Health value the service starts with
    pub fn initial_health(&self) -> bool {
        if self.healthy_after_seconds.is_some() {
            false
        } else {
            self.healthy
        }
    }

    /// Delay before the service turns healthy, if configured
    pub fn healthy_after(&self) -> Option<Duration> {
        self.healthy_after_seconds.map(seconds_to_delay)
    }

    /// Delay before the process crashes, if configured
    pub fn panic_after(&self) -> Option<Duration> {
        self.panic_seconds.map(seconds_to_delay)
    }
}

fn seconds_to_delay(seconds: i64) -> Duration {
    Duration::from_secs(seconds.max(0).unsigned_abs())
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            healthy: true,
            healthy_after_seconds: None,
            panic_seconds: None,
        }
    }
}

impl Validatable for FaultConfig {
    // Any delay is accepted; negative ones fire on the next timer tick
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "faults"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_healthy_without_faults() {
        let config = FaultConfig::default();
        assert!(config.initial_health());
        assert_eq!(config.healthy_after(), None);
        assert_eq!(config.panic_after(), None);
    }

    #[test]
    fn test_healthy_after_forces_unhealthy_start() {
        let config = FaultConfig {
            healthy: true,
            healthy_after_seconds: Some(5),
            panic_seconds: None,
        };
        assert!(!config.initial_health());
        assert_eq!(config.healthy_after(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_negative_delays_clamp_to_zero() {
        let config = FaultConfig {
            healthy: false,
            healthy_after_seconds: Some(-3),
            panic_seconds: Some(-1),
        };
        assert_eq!(config.healthy_after(), Some(Duration::ZERO));
        assert_eq!(config.panic_after(), Some(Duration::ZERO));
    }
}
