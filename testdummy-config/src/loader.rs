//! Configuration loading and environment variable handling

use crate::domains::utils::{parse_bool, parse_duration};
use crate::domains::TestDummyConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "TESTDUMMY";

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<TestDummyConfig> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: TestDummyConfig = serde_yaml::from_str(&content)?;
        debug!("Loaded configuration file {}", path.as_ref().display());

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<TestDummyConfig> {
        let mut config = TestDummyConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<TestDummyConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut TestDummyConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_fault_overrides(&mut config.faults)?;
        self.apply_stress_overrides(&mut config.stress)?;
        self.apply_healthcheck_overrides(&mut config.healthcheck)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply server config overrides
    fn apply_server_overrides(
        &self,
        config: &mut crate::domains::server::ServerConfig,
    ) -> ConfigResult<()> {
        if let Some(bind) = self.get_env_var("BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Some(root) = self.get_env_var("ROOT_PATH") {
            config.root_path = root;
        }

        if let Some(enabled) = self.get_env_var("ENABLE_REQUEST_LOGGING") {
            config.enable_request_logging =
                self.parse_bool_var("ENABLE_REQUEST_LOGGING", &enabled)?;
        }

        if let Some(enabled) = self.get_env_var("ENABLE_ENV") {
            config.enable_env = self.parse_bool_var("ENABLE_ENV", &enabled)?;
        }

        if let Some(path) = self.get_env_var("TERMINATION_LOG_PATH") {
            config.termination_log_path = PathBuf::from(path);
        }

        Ok(())
    }

    /// Apply health and fault overrides
    fn apply_fault_overrides(
        &self,
        config: &mut crate::domains::faults::FaultConfig,
    ) -> ConfigResult<()> {
        if let Some(healthy) = self.get_env_var("HEALTHY") {
            config.healthy = self.parse_bool_var("HEALTHY", &healthy)?;
        }

        if let Some(seconds) = self.get_env_var("HEALTHY_AFTER_SECONDS") {
            config.healthy_after_seconds = Some(self.parse_var("HEALTHY_AFTER_SECONDS", &seconds)?);
        }

        if let Some(seconds) = self.get_env_var("PANIC_SECONDS") {
            config.panic_seconds = Some(self.parse_var("PANIC_SECONDS", &seconds)?);
        }

        Ok(())
    }

    /// Apply stress overrides
    fn apply_stress_overrides(
        &self,
        config: &mut crate::domains::stress::StressConfig,
    ) -> ConfigResult<()> {
        if let Some(duration) = self.get_env_var("STRESS_CPU_DURATION") {
            config.cpu_duration = parse_duration(&duration)
                .map_err(|e| ConfigError::EnvError(format!("Invalid STRESS_CPU_DURATION: {}", e)))?;
        }

        if let Some(workers) = self.get_env_var("STRESS_WORKERS") {
            config.workers = Some(self.parse_var("STRESS_WORKERS", &workers)?);
        }

        Ok(())
    }

    /// Apply health-check overrides
    fn apply_healthcheck_overrides(
        &self,
        config: &mut crate::domains::healthcheck::HealthcheckConfig,
    ) -> ConfigResult<()> {
        if let Some(dsn) = self.get_env_var("HEALTHCHECK_PG_DSN") {
            config.pg_dsn = Some(dsn);
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Some(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Some(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    fn parse_bool_var(&self, name: &str, value: &str) -> ConfigResult<bool> {
        parse_bool(value).ok_or_else(|| {
            ConfigError::EnvError(format!(
                "Invalid {}_{}: '{}' is not a boolean",
                self.prefix, name, value
            ))
        })
    }

    fn parse_var<T>(&self, name: &str, value: &str) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        value
            .trim()
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {}_{}: {}", self.prefix, name, e)))
    }

    /// Get a non-empty environment variable with prefix
    fn get_env_var(&self, name: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, name))
            .ok()
            .filter(|value| !value.is_empty())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
