//! TestDummy server
//!
//! Exposes the fault and load simulation engine over HTTP so orchestrators,
//! load balancers and client libraries can be exercised against a service
//! whose health, latency and lifetime are controlled by the caller.

pub mod handlers;
pub mod startup;
pub mod state;

// Re-export main components
pub use startup::{build_router, join_route, Server};
pub use state::AppState;
