//! Configuration merger for CLI arguments and config files
//!
//! Precedence, highest first: command flags, global flags, environment
//! variables, config files.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, settings::Settings};

/// Applies CLI overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads the base configuration the way the CLI asks for it.
    ///
    /// `--config` switches the loader to single-file mode and `--env` picks
    /// the environment layer. Validation is deferred to
    /// [`Self::merge_cli_args`] so overrides can still fix a value.
    ///
    /// # Errors
    /// Returns ConfigError if a source is missing or cannot be parsed
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        let settings = loader.load_unvalidated()?;
        Ok(Self::new(settings, loader.environment()))
    }

    /// Returns the base configuration with CLI overrides applied, validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(level) = cli.log_level_override() {
            config.logger.level = level.to_string();
        }

        if let Some(Commands::Serve { host, port, .. }) = &cli.command {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }
            if let Some(port_num) = port {
                config.server.port = *port_num;
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/storefront".to_string();
        ConfigurationMerger::new(config, Environment::Test)
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli)
    }

    #[test]
    fn test_no_flags_keeps_base() {
        let merger = merger();
        let cli = Cli::try_parse_from(["storefront"]).unwrap();
        assert_eq!(&merger.merge_cli_args(&cli).unwrap(), merger.config());
        assert_eq!(merger.environment(), Environment::Test);
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["storefront", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["storefront", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_host_and_port() {
        let config = merge(&["storefront", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let config = merge(&["storefront", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(config.logger.level, "warn");
    }

    #[test]
    fn test_merged_config_is_validated() {
        let cli = Cli::try_parse_from(["storefront", "migrate"]).unwrap();
        let merger = ConfigurationMerger::new(Settings::default(), Environment::Development);

        match merger.merge_cli_args(&cli) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "database.url"),
            other => panic!("Expected database.url validation error, got {:?}", other),
        }
    }
}
