//! Fault and load simulation engine
//!
//! The stateful, time sensitive parts of TestDummy live here, independent of
//! any HTTP framework:
//!
//! - [`health::HealthState`]: the shared readiness flag
//! - [`scheduler::DelayedActionScheduler`]: one-shot timers for
//!   [`faults`] armed at startup
//! - [`stress::StressEngine`]: bounded busy-loop CPU saturation
//! - [`stream::StreamSession`]: chat-completion style chunk streaming
//! - [`termination::TerminationTrigger`]: diagnostic-first process exit
//! - [`healthcheck::HealthChecker`]: aggregated dependency checks

pub mod error;
pub mod faults;
pub mod health;
pub mod healthcheck;
pub mod scheduler;
pub mod stream;
pub mod stress;
pub mod termination;

// Re-export main types
pub use error::{CheckError, SinkError, StreamError, TerminationError};
pub use faults::{arm_faults, ArmedFaults, PANIC_EXIT_CODE};
pub use health::HealthState;
pub use healthcheck::{HealthCheck, HealthChecker, HealthReport, HealthStatus, PgReachabilityCheck};
pub use scheduler::{DelayedActionScheduler, ScheduledAction};
pub use stream::{ChannelSink, EmitOutcome, FrameSink, StreamRequest, StreamSession};
pub use stress::{StopSignal, StressEngine, StressReport};
pub use termination::{TerminationTrigger, DEFAULT_EXIT_CODE};

/// Version reported by the service, overridable at build time
pub const VERSION: &str = match option_env!("TESTDUMMY_VERSION") {
    Some(version) => version,
    None => "0.0.0-local",
};
