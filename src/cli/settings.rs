use console::style;

use crate::cli::commands::ConfigAction;
use crate::config::GlobalConfig;
use crate::utils::mask_secret;

fn show_config(config: &GlobalConfig) {
    let unset = || "(not set)".to_string();

    println!();
    println!("  {}", style("Current configuration").bold().cyan());
    println!("  {}", "-".repeat(40));
    println!(
        "  {} {}",
        style("Organization:").bold(),
        config.organization_id.clone().unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        style("Project:").bold(),
        config.project_id.clone().unwrap_or_else(unset)
    );
    println!("  {} {}", style("API URL:").bold(), config.api_url);
    println!(
        "  {} {}",
        style("Credential:").bold(),
        config.credential.name.clone().unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        style("Token:").bold(),
        config.token().map(mask_secret).unwrap_or_else(unset)
    );
    println!();
}

pub fn handle_config_action(action: ConfigAction, config: &GlobalConfig) {
    match action {
        ConfigAction::Show => show_config(config),
    }
}
