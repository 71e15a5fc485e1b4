mod api;
mod cli;
mod config;
mod error;
mod models;
mod status;
mod utils;

use clap::Parser;
use cli::commands::Cli;
use cli::display;
use config::GlobalConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let result = match GlobalConfig::load(cli.config_path.as_deref()) {
        Ok(config) => cli::handle_command(cli.command, &config).await,
        Err(e) => Err(anyhow::Error::new(e).context("Failed to load config")),
    };

    if let Err(e) = result {
        display::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
