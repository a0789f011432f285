//! Configuration management for the Ranger MCP Server
//!
//! Handles environment variables and command-line overrides.

use crate::error::{ConfigError, Result};

/// Environment variable holding the log filter directives
pub const LOG_FILTER_VAR: &str = "RANGER_LOG";

/// Environment variable overriding the advertised server name
pub const SERVER_NAME_VAR: &str = "RANGER_SERVER_NAME";

/// Environment variable overriding the logger name stamped on records
pub const LOGGER_NAME_VAR: &str = "RANGER_LOGGER_NAME";

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_SERVER_NAME: &str = "ranger server";
const DEFAULT_LOGGER_NAME: &str = "ranger_mcp";

/// Configuration for the Ranger MCP Server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name reported in `serverInfo` during initialization
    pub server_name: String,

    /// `tracing` filter directives (same syntax as `RUST_LOG`)
    pub log_filter: String,

    /// Logger name attached to every log record
    pub logger_name: String,
}

impl Config {
    /// Create a new configuration from the process environment
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let config = Self {
            server_name: read(SERVER_NAME_VAR, DEFAULT_SERVER_NAME),
            log_filter: read(LOG_FILTER_VAR, DEFAULT_LOG_FILTER),
            logger_name: read(LOGGER_NAME_VAR, DEFAULT_LOGGER_NAME),
        };
        config.validate()?;

        Ok(config)
    }

    /// Override the log filter
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Override the server name
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.server_name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "server name must not be empty".to_string(),
            }
            .into());
        }

        if self.logger_name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "logger name must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server_name, "ranger server");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            (LOG_FILTER_VAR, "debug"),
            (SERVER_NAME_VAR, "ranger test"),
            (LOGGER_NAME_VAR, "ranger_test"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.server_name, "ranger test");
        assert_eq!(config.logger_name, "ranger_test");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(|_| Some("   ".to_string())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_server_name_rejected() {
        let config = Config::default().with_server_name("");
        assert!(config.validate().is_err());
    }
}
