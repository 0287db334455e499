//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Catalog API server for categories and products
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Catalog API server for categories and products")]
#[command(long_about = "
Storefront serves a JSON API over a PostgreSQL catalog of categories and
products, with slug lookup, paginated listings and OpenAPI documentation.

EXAMPLES:
    # Start the server with default configuration
    storefront serve

    # Start server on custom host and port
    storefront serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    storefront --config /path/to/config.toml serve

    # Run in development mode with verbose logging
    storefront --env development --verbose serve

    # Check configuration without starting server
    storefront serve --dry-run

    # Run database migrations
    storefront migrate

    # Preview pending migrations
    storefront migrate --dry-run

    # Rollback last 2 migrations
    storefront migrate --rollback 2
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered files under
    /// `config/`. Environment variables still override it.
    ///
    /// Example: --config /etc/storefront/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Takes precedence over STOREFRONT_APP_ENV and selects which
    /// `config/{environment}.toml` layer is loaded.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   storefront serve                           # Start with defaults
    ///   storefront serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   storefront serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections
        /// from any interface.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (1-65535)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Wins over both the configuration file and --verbose/--quiet.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   storefront migrate                    # Apply all pending migrations
    ///   storefront migrate --dry-run          # Show pending migrations without applying
    ///   storefront migrate --rollback 3       # Rollback the last 3 migrations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback (1-100)
        ///
        /// Reverting the product or category tables drops their data.
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// The subcommand to run; a bare `storefront` means `serve`.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            host: None,
            port: None,
            log_level: None,
            dry_run: false,
        })
    }

    /// Log level implied by the flags, most specific first.
    pub fn log_level_override(&self) -> Option<&'static str> {
        if let Some(Commands::Serve {
            log_level: Some(level),
            ..
        }) = &self.command
        {
            return Some(level.as_str());
        }
        if self.verbose {
            Some(LogLevel::Debug.as_str())
        } else if self.quiet {
            Some(LogLevel::Error.as_str())
        } else {
            None
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
