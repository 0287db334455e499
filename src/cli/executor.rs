//! Command executor for dispatching CLI commands
//!
//! Runs after parsing, configuration loading and logger setup.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{Environment, settings::Settings};
use crate::error::AppResult;

/// Dispatches the parsed command to its handler. A bare invocation serves.
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    environment: Environment,
) -> AppResult<()> {
    let command = cli.command_or_default();
    warn_about_risky_args(&command);

    match command {
        Commands::Serve { dry_run, .. } => {
            ServeCommandHandler::new(settings, environment)
                .execute(dry_run)
                .await
        }
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await
        }
    }
}

/// Logs warnings for arguments that are valid but likely unintended
fn warn_about_risky_args(command: &Commands) {
    match command {
        Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        } if *port < 1024 && host == "0.0.0.0" => {
            tracing::warn!(
                port = *port,
                "Binding to a privileged port on all interfaces requires root privileges"
            );
        }
        Commands::Migrate {
            rollback: Some(steps),
            ..
        } if *steps > 10 => {
            tracing::warn!(
                steps = *steps,
                "Rolling back many migrations drops catalog tables and their data"
            );
        }
        _ => {}
    }
}
