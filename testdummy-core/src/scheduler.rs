//! One-shot delayed actions
//!
//! An action is armed once, fires once after its delay on a runtime timer,
//! and is never rearmed. Nothing about a scheduled action can be cancelled:
//! [`ScheduledAction`] only lets callers observe it.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Deadline used when a delay would overflow the clock, roughly 30 years out
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Arms fire-and-forget timers on the current Tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayedActionScheduler;

impl DelayedActionScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Run `effect` once after `delay`.
    ///
    /// The effect always runs on a spawned task, never inline, even for a
    /// zero delay. Must be called from within a Tokio runtime.
    /// A delay too large for the clock saturates to a far-future deadline.
    pub fn schedule<F>(
        &self,
        name: impl Into<String>,
        delay: Duration,
        effect: F,
    ) -> ScheduledAction
    where
        F: FnOnce() + Send + 'static,
    {
        let name = name.into();
        let now = Instant::now();
        let fire_at = now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE);
        info!("Scheduled '{}' to fire in {:?}", name, delay);

        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(fire_at).await;
            debug!("Firing delayed action '{}'", task_name);
            effect();
        });

        ScheduledAction {
            name,
            fire_at,
            handle,
        }
    }
}

/// Observer for an armed action
#[derive(Debug)]
pub struct ScheduledAction {
    name: String,
    fire_at: Instant,
    handle: JoinHandle<()>,
}

impl ScheduledAction {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instant the action is due
    pub fn fire_at(&self) -> Instant {
        self.fire_at
    }

    /// Whether the effect has run to completion
    pub fn is_fired(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait until the effect has run
    pub async fn fired(self) {
        if let Err(e) = self.handle.await {
            tracing::error!("Delayed action '{}' failed: {}", self.name, e);
        }
    }
}
