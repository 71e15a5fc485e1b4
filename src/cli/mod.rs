pub mod commands;
pub mod deployment;
pub mod display;
pub mod settings;

use crate::cli::commands::Commands;
use crate::config::GlobalConfig;

/// Handle a specific CLI subcommand
pub async fn handle_command(cmd: Commands, config: &GlobalConfig) -> anyhow::Result<()> {
    match cmd {
        Commands::Status => {
            deployment::show_status(config).await?;
        }
        Commands::Deploy => {
            deployment::deploy(config).await?;
        }
        Commands::Destroy { yes } => {
            deployment::destroy(config, yes).await?;
        }
        Commands::Config { action } => {
            settings::handle_config_action(action, config);
        }
    }
    Ok(())
}
