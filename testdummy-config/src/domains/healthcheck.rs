//! Dependency health-check configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Checks aggregated by the `/healthcheck` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HealthcheckConfig {
    /// PostgreSQL DSN whose server must be reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg_dsn: Option<String>,
}

impl Validatable for HealthcheckConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(ref dsn) = self.pg_dsn {
            validate_required_string(dsn, "pg_dsn", self.domain_name())?;
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "healthcheck"
    }
}
