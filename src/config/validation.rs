//! Configuration validation logic
//!
//! Each section checks its own ranges; `Settings::validate` returns the
//! first failure.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, PaginationConfig, ServerConfig, Settings};
use crate::logger::LoggerConfig;

const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

/// Upper bound the HTTP layer enforces on `page_size`.
pub const PAGE_SIZE_LIMIT: u32 = 100;

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if let Some(origin) = self
            .cors_allowed_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::validation(
                "server.cors_allowed_origins",
                format!("Origin '{}' must start with http:// or https://", origin),
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url or STOREFRONT_DATABASE__URL.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 || self.max_page_size > PAGE_SIZE_LIMIT {
            return Err(ConfigError::validation(
                "pagination.max_page_size",
                format!("Max page size must be between 1 and {}.", PAGE_SIZE_LIMIT),
            ));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::validation(
                "pagination.default_page_size",
                format!(
                    "Default page size must be between 1 and {}.",
                    self.max_page_size
                ),
            ));
        }

        Ok(())
    }
}

fn validate_logger(logger: &LoggerConfig) -> Result<(), ConfigError> {
    logger
        .validate()
        .map_err(|e| ConfigError::validation("logger", e.to_string()))
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        validate_logger(&self.logger)?;
        self.pagination.validate()?;
        Ok(())
    }
}
