//! Structured logging setup for TestDummy
//!
//! Everything in the workspace logs through `tracing`. This crate installs
//! the global `tracing-subscriber` according to the logging domain of the
//! configuration.

pub mod init;

pub use init::{filter_directive, init_logging_from_config};
