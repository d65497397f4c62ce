//! Aggregated dependency health checks
//!
//! Separate from the `/health` flag: checks reach real dependencies and are
//! reported together as a single JSON document.

pub mod postgres;

use crate::error::CheckError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use testdummy_config::HealthcheckConfig;
use tracing::{debug, warn};

pub use postgres::PgReachabilityCheck;

/// Timeout applied to checks that do not pick their own
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

pub const COMPONENT_NAME: &str = "testdummy";

/// A named check of one dependency
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &str;

    fn timeout(&self) -> Duration {
        DEFAULT_CHECK_TIMEOUT
    }

    /// A failing check with this set only degrades the report
    fn skip_on_err(&self) -> bool {
        false
    }

    async fn check(&self) -> Result<(), CheckError>;
}

/// Overall status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Partially Available")]
    PartiallyAvailable,
    #[serde(rename = "Unavailable")]
    Unavailable,
}

impl HealthStatus {
    /// HTTP status code the report is served with
    pub fn http_status(&self) -> u16 {
        match self {
            HealthStatus::Unavailable => 503,
            HealthStatus::Ok | HealthStatus::PartiallyAvailable => 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub version: String,
}

/// Result of running every registered check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    /// Failure message per check name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<String, String>,
    pub component: Component,
}

/// Registry of checks evaluated together
#[derive(Clone)]
pub struct HealthChecker {
    checks: Vec<Arc<dyn HealthCheck>>,
    component: Component,
}

impl HealthChecker {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            component: Component {
                name: COMPONENT_NAME.to_string(),
                version: version.into(),
            },
        }
    }

    /// Register the checks the configuration asks for
    pub fn from_config(config: &HealthcheckConfig) -> Self {
        let mut checker = Self::new(crate::VERSION);
        if let Some(ref dsn) = config.pg_dsn {
            checker.register(PgReachabilityCheck::new(dsn.clone()));
        }
        checker
    }

    pub fn register<C: HealthCheck + 'static>(&mut self, check: C) {
        debug!("Registered health check '{}'", check.name());
        self.checks.push(Arc::new(check));
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check concurrently, each bounded by its own timeout
    pub async fn run(&self) -> HealthReport {
        let results = join_all(self.checks.iter().map(|check| async move {
            let timeout = check.timeout();
            let result = match tokio::time::timeout(timeout, check.check()).await {
                Ok(result) => result,
                Err(_) => Err(CheckError::Timeout(timeout)),
            };
            (check, result)
        }))
        .await;

        let mut status = HealthStatus::Ok;
        let mut failures = BTreeMap::new();
        for (check, result) in results {
            if let Err(e) = result {
                warn!("Health check '{}' failed: {}", check.name(), e);
                failures.insert(check.name().to_string(), e.to_string());
                status = match (status, check.skip_on_err()) {
                    (HealthStatus::Unavailable, _) | (_, false) => HealthStatus::Unavailable,
                    (_, true) => HealthStatus::PartiallyAvailable,
                };
            }
        }

        HealthReport {
            status,
            timestamp: Utc::now(),
            failures,
            component: self.component.clone(),
        }
    }
}

impl std::fmt::Debug for HealthChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.checks.iter().map(|c| c.name()).collect();
        f.debug_struct("HealthChecker")
            .field("checks", &names)
            .field("component", &self.component)
            .finish()
    }
}
