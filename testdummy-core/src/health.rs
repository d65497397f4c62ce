//! Process-wide health state

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply clonable readiness flag shared by every request and timer.
///
/// Clones observe the same value.
#[derive(Clone)]
pub struct HealthState(Arc<AtomicBool>);

impl HealthState {
    /// Create a new health state with the given initial value
    pub fn new(initial: bool) -> Self {
        Self(Arc::new(AtomicBool::new(initial)))
    }

    /// Current health
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Overwrite the health, visible to all subsequent reads
    pub fn set(&self, healthy: bool) {
        self.0.store(healthy, Ordering::Release)
    }

    /// Apply an optional override, keeping the current value when absent.
    ///
    /// Returns the health after the override.
    pub fn apply_override(&self, healthy: Option<bool>) -> bool {
        if let Some(value) = healthy {
            tracing::info!("Setting healthy to: {}", value);
            self.set(value);
        }
        self.get()
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthState").field("healthy", &self.get()).finish()
    }
}
