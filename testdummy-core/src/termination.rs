//! Diagnostic-first process termination

use crate::error::TerminationError;
use std::path::{Path, PathBuf};
use testdummy_config::ServerConfig;
use tracing::{error, info};

/// Exit status used when the caller supplies none
pub const DEFAULT_EXIT_CODE: i32 = 1;

/// Ends the process after leaving a termination message behind
#[derive(Debug, Clone)]
pub struct TerminationTrigger {
    log_path: PathBuf,
}

impl TerminationTrigger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.termination_log_path)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Render the fatal error the process dies with
    pub fn diagnostic() -> String {
        format!("{:?}", anyhow::anyhow!("Fatal error"))
    }

    /// Write the diagnostic, replacing any previous contents
    pub fn write_diagnostic(&self) -> Result<(), TerminationError> {
        std::fs::write(&self.log_path, Self::diagnostic()).map_err(|source| {
            TerminationError::WriteFailed {
                path: self.log_path.clone(),
                source,
            }
        })
    }

    /// Write the diagnostic and exit with `code`. A failed write does not
    /// stop the exit.
    pub fn trigger(&self, code: i32) -> ! {
        if let Err(e) = self.write_diagnostic() {
            error!("Error writing to termination log: {}", e);
        }
        info!("Exiting with code {}", code);
        std::process::exit(code)
    }
}
