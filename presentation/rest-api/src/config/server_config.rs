use std::env;
use std::time::Duration;

use super::error::ConfigError;

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: "8080")
    /// - SHUTDOWN_TIMEOUT_SECS: Graceful shutdown window (default: "10")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let ip = lookup("SERVICE_IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("SERVICE_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVariable {
                name: "SERVICE_PORT",
                value: raw,
            })?,
            None => 8080,
        };
        let shutdown_timeout = match lookup("SHUTDOWN_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                ConfigError::InvalidVariable {
                    name: "SHUTDOWN_TIMEOUT_SECS",
                    value: raw,
                }
            })?),
            None => Duration::from_secs(10),
        };

        Ok(Self {
            ip,
            port,
            shutdown_timeout,
        })
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_bind_address_from_ip_and_port() {
        // Arrange
        let config = ServerConfig {
            ip: "127.0.0.1".to_string(),
            port: 8080,
            shutdown_timeout: Duration::from_secs(10),
        };

        // Act
        let address = config.bind_address();

        // Assert
        assert_eq!(address, "127.0.0.1:8080");
    }

    #[test]
    fn should_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
    }

    #[test]
    fn should_reject_non_numeric_port() {
        let result = ServerConfig::from_lookup(|name| {
            (name == "SERVICE_PORT").then(|| "eighty".to_string())
        });

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidVariable {
                name: "SERVICE_PORT",
                value: "eighty".to_string(),
            }
        );
    }
}
