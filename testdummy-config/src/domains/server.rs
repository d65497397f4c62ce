//! Server configuration

use crate::error::ConfigResult;
use crate::validation::{validate_absolute_path, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default location an orchestrator reads to learn why a container died
pub const DEFAULT_TERMINATION_LOG_PATH: &str = "/dev/termination-log";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, either `host:port` or `:port` for all interfaces
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Prefix every route is mounted under
    #[serde(default = "default_root_path")]
    pub root_path: String,

    /// Log method, path and peer of every request
    #[serde(default = "crate::domains::utils::default_false")]
    pub enable_request_logging: bool,

    /// Expose the process environment on `/env`
    #[serde(default = "crate::domains::utils::default_false")]
    pub enable_env: bool,

    /// Where the termination trigger writes its diagnostic
    #[serde(default = "default_termination_log_path")]
    pub termination_log_path: PathBuf,
}

impl ServerConfig {
    /// Resolve the bind address into a socket address.
    ///
    /// A leading `:` (no host) binds every IPv4 interface.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        let address = self.bind_address.trim();
        let address = if address.starts_with(':') {
            format!("0.0.0.0{}", address)
        } else {
            address.to_string()
        };

        address.parse().map_err(|e| {
            self.validation_error(format!("Invalid bind_address '{}': {}", self.bind_address, e))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            root_path: default_root_path(),
            enable_request_logging: false,
            enable_env: false,
            termination_log_path: default_termination_log_path(),
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        self.socket_addr()?;
        validate_absolute_path(&self.root_path, "root_path", self.domain_name())?;

        if self.termination_log_path.as_os_str().is_empty() {
            return Err(self.validation_error("termination_log_path cannot be empty"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

// Default value functions
fn default_bind_address() -> String {
    ":8000".to_string()
}

fn default_root_path() -> String {
    "/".to_string()
}

fn default_termination_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_TERMINATION_LOG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, ":8000");
        assert_eq!(config.root_path, "/");
        assert!(!config.enable_request_logging);
        assert!(!config.enable_env);
        assert_eq!(config.termination_log_path, PathBuf::from("/dev/termination-log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_only_bind_address() {
        let config = ServerConfig::default();
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_explicit_bind_address() {
        let config = ServerConfig {
            bind_address: "127.0.0.1:9000".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_invalid_server_config() {
        let config = ServerConfig {
            bind_address: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            root_path: "api".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
