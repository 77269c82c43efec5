use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pool_finder::application::{Cli, CommandExecutor};
use pool_finder::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: CLI args > Config file > Defaults
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    CommandExecutor::execute(cli, config).await?;
    Ok(())
}
