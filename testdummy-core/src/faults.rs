//! Faults armed at startup
//!
//! Two one-shot faults can be configured: becoming healthy some time after
//! boot, and crashing some time after boot.

use crate::health::HealthState;
use crate::scheduler::{DelayedActionScheduler, ScheduledAction};
use testdummy_config::FaultConfig;
use tracing::{error, info};

/// Exit status of a process that dies from an unrecovered panic
pub const PANIC_EXIT_CODE: i32 = 2;

const PANIC_REASON: &str = "Panicking due to TESTDUMMY_PANIC_SECONDS being set";

/// Faults scheduled by [`arm_faults`]
#[derive(Debug, Default)]
pub struct ArmedFaults {
    pub healthy_after: Option<ScheduledAction>,
    pub panic_after: Option<ScheduledAction>,
}

impl ArmedFaults {
    pub fn is_empty(&self) -> bool {
        self.healthy_after.is_none() && self.panic_after.is_none()
    }
}

/// Arm the configured faults, crashing the process when panic-after fires
pub fn arm_faults(
    config: &FaultConfig,
    health: &HealthState,
    scheduler: &DelayedActionScheduler,
) -> ArmedFaults {
    arm_faults_with(config, health, scheduler, crash)
}

/// Arm the configured faults with a custom crash effect
pub fn arm_faults_with<C>(
    config: &FaultConfig,
    health: &HealthState,
    scheduler: &DelayedActionScheduler,
    on_panic: C,
) -> ArmedFaults
where
    C: FnOnce(&'static str) + Send + 'static,
{
    let mut armed = ArmedFaults::default();

    if let Some(delay) = config.healthy_after() {
        health.set(false);
        let health = health.clone();
        armed.healthy_after = Some(scheduler.schedule("healthy-after", delay, move || {
            info!("Delayed activation reached, reporting healthy");
            health.set(true);
        }));
    }

    if let Some(delay) = config.panic_after() {
        armed.panic_after = Some(scheduler.schedule("panic-after", delay, move || {
            on_panic(PANIC_REASON)
        }));
    }

    armed
}

/// Die immediately without running any cleanup
fn crash(reason: &'static str) {
    error!("panic: {}", reason);
    std::process::exit(PANIC_EXIT_CODE);
}
