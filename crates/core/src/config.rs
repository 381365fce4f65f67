//! Shared configuration loader for CareMatch services
//!
//! All configuration is read from environment variables with the `CAREMATCH_`
//! prefix, after an optional `.env` file has been loaded through dotenvy.
//! Override order: defaults < .env < environment.
//!
//! # Example
//!
//! ```no_run
//! use carematch_core::config::{load_dotenv, ConfigLoader, DatabaseConfig, ServiceConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! load_dotenv();
//!
//! let db_config = DatabaseConfig::from_env()?;
//! let service_config = ServiceConfig::from_env()?;
//!
//! db_config.validate()?;
//! service_config.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::CoreError;
use std::time::Duration;
use url::Url;

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration from
/// environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables, falling back to defaults
    /// for optional values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a required variable is missing or a
    /// value cannot be parsed.
    fn from_env() -> Result<Self, CoreError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any validation check fails.
    fn validate(&self) -> Result<(), CoreError>;
}

/// Database configuration
///
/// # Environment Variables
///
/// - `CAREMATCH_DATABASE_URL` or `DATABASE_URL` (required): PostgreSQL connection URL
/// - `CAREMATCH_DATABASE_MAX_CONNECTIONS` (optional): Maximum pool connections (default: 10)
/// - `CAREMATCH_DATABASE_MIN_CONNECTIONS` (optional): Minimum pool connections (default: 1)
/// - `CAREMATCH_DATABASE_CONNECT_TIMEOUT` (optional): Connection timeout in seconds (default: 30)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    pub min_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/carematch".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl ConfigLoader for DatabaseConfig {
    fn from_env() -> Result<Self, CoreError> {
        let url = std::env::var("CAREMATCH_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .map_err(|_| {
                CoreError::config(
                    "DATABASE_URL or CAREMATCH_DATABASE_URL must be set",
                    "CAREMATCH_DATABASE_URL",
                )
            })?;

        let defaults = DatabaseConfig::default();
        let max_connections =
            parse_env_var("CAREMATCH_DATABASE_MAX_CONNECTIONS", defaults.max_connections)?;
        let min_connections =
            parse_env_var("CAREMATCH_DATABASE_MIN_CONNECTIONS", defaults.min_connections)?;
        let connect_timeout_secs = parse_env_var("CAREMATCH_DATABASE_CONNECT_TIMEOUT", 30u64)?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        Url::parse(&self.url).map_err(|e| {
            CoreError::config(
                format!("Invalid DATABASE_URL: {}", e),
                "CAREMATCH_DATABASE_URL",
            )
        })?;

        if self.max_connections == 0 {
            return Err(CoreError::config(
                "max_connections must be greater than 0",
                "CAREMATCH_DATABASE_MAX_CONNECTIONS",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(CoreError::config(
                format!(
                    "min_connections ({}) cannot exceed max_connections ({})",
                    self.min_connections, self.max_connections
                ),
                "CAREMATCH_DATABASE_MIN_CONNECTIONS",
            ));
        }

        if self.connect_timeout.as_secs() == 0 {
            return Err(CoreError::config(
                "connect_timeout must be greater than 0 seconds",
                "CAREMATCH_DATABASE_CONNECT_TIMEOUT",
            ));
        }

        Ok(())
    }
}

/// Service configuration
///
/// # Environment Variables
///
/// - `CAREMATCH_SERVICE_HOST` or `HOST` (optional): Bind host (default: "0.0.0.0")
/// - `CAREMATCH_SERVICE_PORT` or `PORT` (optional): Bind port (default: 8080)
/// - `CAREMATCH_SERVICE_WORKERS` (optional): Worker threads (default: CPU count)
/// - `CAREMATCH_SERVICE_LOG_LEVEL` or `RUST_LOG` (optional): Log level (default: "info")
/// - `CAREMATCH_SERVICE_REQUEST_TIMEOUT` (optional): Request timeout in seconds (default: 60)
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            log_level: "info".to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ConfigLoader for ServiceConfig {
    fn from_env() -> Result<Self, CoreError> {
        let defaults = ServiceConfig::default();

        let host = std::env::var("CAREMATCH_SERVICE_HOST")
            .or_else(|_| std::env::var("HOST"))
            .unwrap_or(defaults.host);

        let port = match std::env::var("CAREMATCH_SERVICE_PORT") {
            Ok(_) => parse_env_var("CAREMATCH_SERVICE_PORT", defaults.port)?,
            Err(_) => parse_env_var("PORT", defaults.port)?,
        };

        let workers = parse_env_var("CAREMATCH_SERVICE_WORKERS", defaults.workers)?;

        let log_level = std::env::var("CAREMATCH_SERVICE_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(defaults.log_level);

        let request_timeout_secs = parse_env_var("CAREMATCH_SERVICE_REQUEST_TIMEOUT", 60u64)?;

        Ok(Self {
            host,
            port,
            workers,
            log_level,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.port == 0 {
            return Err(CoreError::config(
                "port must be greater than 0",
                "CAREMATCH_SERVICE_PORT",
            ));
        }

        if self.workers == 0 {
            return Err(CoreError::config(
                "workers must be greater than 0",
                "CAREMATCH_SERVICE_WORKERS",
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(CoreError::config(
                format!(
                    "Invalid log_level '{}'. Must be one of: {}",
                    self.log_level,
                    valid_log_levels.join(", ")
                ),
                "CAREMATCH_SERVICE_LOG_LEVEL",
            ));
        }

        if self.request_timeout.as_secs() == 0 {
            return Err(CoreError::config(
                "request_timeout must be greater than 0 seconds",
                "CAREMATCH_SERVICE_REQUEST_TIMEOUT",
            ));
        }

        Ok(())
    }
}

/// Parse an environment variable into `T`, returning `default` when unset.
///
/// # Errors
///
/// Returns a `ConfigurationError` if the variable is set but cannot be parsed.
pub fn parse_env_var<T>(key: &str, default: T) -> Result<T, CoreError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| CoreError::config(format!("Failed to parse {}: {}", key, e), key))
        })
        .unwrap_or(Ok(default))
}

/// Load a `.env` file if present. A missing file is not an error.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_database_config_from_env() {
        env::set_var("CAREMATCH_DATABASE_URL", "postgresql://localhost/test");
        env::set_var("CAREMATCH_DATABASE_MAX_CONNECTIONS", "50");
        env::set_var("CAREMATCH_DATABASE_MIN_CONNECTIONS", "5");

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.url, "postgresql://localhost/test");
        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 5);

        env::remove_var("CAREMATCH_DATABASE_URL");
        env::remove_var("CAREMATCH_DATABASE_MAX_CONNECTIONS");
        env::remove_var("CAREMATCH_DATABASE_MIN_CONNECTIONS");
    }

    #[test]
    fn test_database_config_validation_invalid_url() {
        let config = DatabaseConfig {
            url: "not-a-valid-url".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate().unwrap_err(),
            CoreError::ConfigurationError { .. }
        ));
    }

    #[test]
    fn test_database_config_validation_min_exceeds_max() {
        let config = DatabaseConfig {
            min_connections: 30,
            max_connections: 20,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_service_config_default() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(config.workers > 0);
    }

    #[test]
    fn test_service_config_from_env() {
        env::set_var("CAREMATCH_SERVICE_HOST", "127.0.0.1");
        env::set_var("CAREMATCH_SERVICE_PORT", "3000");
        env::set_var("CAREMATCH_SERVICE_WORKERS", "4");
        env::set_var("CAREMATCH_SERVICE_LOG_LEVEL", "debug");

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.workers, 4);
        assert_eq!(config.log_level, "debug");

        env::remove_var("CAREMATCH_SERVICE_HOST");
        env::remove_var("CAREMATCH_SERVICE_PORT");
        env::remove_var("CAREMATCH_SERVICE_WORKERS");
        env::remove_var("CAREMATCH_SERVICE_LOG_LEVEL");
    }

    #[test]
    fn test_service_config_validation_invalid_log_level() {
        let config = ServiceConfig {
            log_level: "invalid".to_string(),
            ..Default::default()
        };

        match config.validate().unwrap_err() {
            CoreError::ConfigurationError { message, .. } => {
                assert!(message.contains("Invalid log_level"));
            }
            _ => panic!("Expected ConfigurationError"),
        }
    }

    #[test]
    fn test_service_config_validation_zero_port() {
        let config = ServiceConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_var_with_default() {
        let result: u32 = parse_env_var("CAREMATCH_NON_EXISTENT_VAR", 42).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_env_var_invalid_value() {
        env::set_var("CAREMATCH_TEST_INVALID_VAR", "not-a-number");
        let result: Result<u32, _> = parse_env_var("CAREMATCH_TEST_INVALID_VAR", 42);
        assert!(result.is_err());
        env::remove_var("CAREMATCH_TEST_INVALID_VAR");
    }
}
