//! CPU stress engine
//!
//! A stress job saturates every configured core for a fixed wall-clock
//! duration. Workers are OS threads spinning on a shared stop flag, so the
//! async runtime keeps serving other requests while the job runs. The
//! calling request sleeps for the duration, raises the flag and returns
//! without joining the workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use testdummy_config::StressConfig;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Broadcast stop flag polled by busy-loop workers
#[derive(Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tell every holder to stop
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("raised", &self.is_raised())
            .finish()
    }
}

/// Raises the signal when dropped, so an abandoned request still stops its workers
struct RaiseOnDrop(StopSignal);

impl Drop for RaiseOnDrop {
    fn drop(&mut self) {
        self.0.raise();
    }
}

/// Outcome of a stress job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressReport {
    pub workers_started: usize,
    pub elapsed: Duration,
}

impl StressReport {
    fn idle() -> Self {
        Self {
            workers_started: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// Runs stress jobs with a fixed worker count
#[derive(Debug, Clone)]
pub struct StressEngine {
    workers: usize,
}

impl StressEngine {
    /// Create an engine with an explicit worker count (at least one)
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// One worker per hardware thread
    pub fn with_hardware_parallelism() -> Self {
        Self::new(hardware_parallelism())
    }

    pub fn from_config(config: &StressConfig) -> Self {
        config
            .workers
            .map(Self::new)
            .unwrap_or_else(Self::with_hardware_parallelism)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Saturate the CPU for `duration`.
    ///
    /// A zero duration returns at once without starting workers. Otherwise
    /// the call lasts `duration` and returns right after the stop signal is
    /// raised.
    pub async fn run(&self, duration: Duration) -> StressReport {
        if duration.is_zero() {
            return StressReport::idle();
        }

        info!("Stressing CPU for {:?}", duration);
        let start = Instant::now();
        let guard = RaiseOnDrop(StopSignal::new());
        let workers_started = self.spawn_workers(&guard.0).len();

        tokio::time::sleep(duration).await;
        drop(guard);

        let report = StressReport {
            workers_started,
            elapsed: start.elapsed(),
        };
        debug!(
            "Stress job finished: {} workers for {:?}",
            report.workers_started, report.elapsed
        );
        report
    }

    /// Start the busy-loop workers; failures to spawn are logged and skipped
    fn spawn_workers(&self, stop: &StopSignal) -> Vec<JoinHandle<()>> {
        (0..self.workers)
            .filter_map(|index| {
                let stop = stop.clone();
                std::thread::Builder::new()
                    .name(format!("stress-worker-{}", index))
                    .spawn(move || busy_loop(&stop))
                    .map_err(|e| warn!("Failed to start stress worker {}: {}", index, e))
                    .ok()
            })
            .collect()
    }
}

impl Default for StressEngine {
    fn default() -> Self {
        Self::with_hardware_parallelism()
    }
}

fn busy_loop(stop: &StopSignal) {
    while !stop.is_raised() {
        std::hint::spin_loop();
    }
}

/// Available hardware parallelism, falling back to a single worker
pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
