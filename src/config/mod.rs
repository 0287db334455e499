//! Configuration management
//!
//! Settings come from TOML files layered by environment and are topped up by
//! `STOREFRONT_*` environment variables. See [`loader`] for the order.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, PaginationConfig, ServerConfig, Settings};
