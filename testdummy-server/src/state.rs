//! Shared handler state

use std::time::Duration;
use testdummy_config::TestDummyConfig;
use testdummy_core::{HealthChecker, HealthState, StressEngine, TerminationTrigger};

/// Everything handlers need, cloned into every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub health: HealthState,
    pub stress: StressEngine,
    /// How long `/ping` saturates the CPU before answering
    pub stress_duration: Duration,
    pub termination: TerminationTrigger,
    pub checker: HealthChecker,
}

impl AppState {
    pub fn from_config(config: &TestDummyConfig, health: HealthState) -> Self {
        Self {
            health,
            stress: StressEngine::from_config(&config.stress),
            stress_duration: config.stress.cpu_duration,
            termination: TerminationTrigger::from_config(&config.server),
            checker: HealthChecker::from_config(&config.healthcheck),
        }
    }
}
