use clap::Parser;
use storefront::cli::{Cli, execute_command, load_and_merge_config};
use storefront::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, environment) = load_and_merge_config(&cli)?;
    init_logger(settings.logger.clone())?;

    execute_command(&cli, settings, environment).await?;

    Ok(())
}
