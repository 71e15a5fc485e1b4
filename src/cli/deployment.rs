use anyhow::Context;
use console::style;
use dialoguer::Confirm;

use crate::api::ApiClient;
use crate::cli::display;
use crate::config::GlobalConfig;
use crate::models::project::ProjectIdentity;
use crate::status;

/// Organization and project ids, if both are selected in the config.
fn selection(config: &GlobalConfig) -> Option<(&str, &str)> {
    let Some(org_id) = config.organization_id.as_deref() else {
        display::print_no_selected_organization();
        return None;
    };
    let Some(project_id) = config.project_id.as_deref() else {
        display::print_no_selected_project();
        return None;
    };
    Some((org_id, project_id))
}

pub async fn show_status(config: &GlobalConfig) -> anyhow::Result<()> {
    let Some((org_id, project_id)) = selection(config) else {
        return Ok(());
    };
    let client = ApiClient::new(config)?;

    let spinner = display::spinner("Fetching deployment status...");
    let result = async {
        let project = client
            .get_project(org_id, project_id)
            .await
            .context("Failed to get project details")?;
        let project = ProjectIdentity {
            id: project_id.to_string(),
            ..project
        };
        status::run(&client, project)
            .await
            .context("Failed to get deployment status")
    }
    .await;
    spinner.finish_and_clear();

    print!("{}", result?.report());
    Ok(())
}

pub async fn deploy(config: &GlobalConfig) -> anyhow::Result<()> {
    let Some((org_id, project_id)) = selection(config) else {
        return Ok(());
    };
    let client = ApiClient::new(config)?;

    let org = client
        .get_organization(org_id)
        .await
        .context("Failed to get organization details")?;
    let project = client
        .get_project(org_id, project_id)
        .await
        .context("Failed to get project details")?;
    display::print_project_details("Deployment Details", &org, &project);

    let spinner = display::spinner("Requesting deployment...");
    let result = client.deploy(org_id, project_id).await;
    spinner.finish_and_clear();
    result.context("Failed to deploy project")?;
    tracing::info!(project_id, "deploy requested");

    display::print_success("Your deployment is being processed!");
    println!();
    println!("  To check the status of your deployment, run:");
    println!("    $ {}", style("forge status").cyan());
    Ok(())
}

pub async fn destroy(config: &GlobalConfig, skip_confirm: bool) -> anyhow::Result<()> {
    let Some((org_id, project_id)) = selection(config) else {
        return Ok(());
    };
    let client = ApiClient::new(config)?;

    let org = client
        .get_organization(org_id)
        .await
        .context("Failed to get organization details")?;
    let project = client
        .get_project(org_id, project_id)
        .await
        .context("Failed to get project details")?;
    display::print_project_details("Project Details", &org, &project);

    if !skip_confirm {
        let confirm = Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt(format!(
                "Are you sure you want to destroy '{}'?",
                project.name
            ))
            .default(false)
            .interact()?;

        if !confirm {
            println!("  Destroy cancelled.");
            return Ok(());
        }
    }

    let spinner = display::spinner("Requesting destroy...");
    let result = client.destroy(org_id, project_id).await;
    spinner.finish_and_clear();
    result.context("Failed to destroy project")?;
    tracing::info!(project_id, "destroy requested");

    display::print_success("Your destroy request is being processed!");
    println!();
    println!("  To check the status of your destroy request, run:");
    println!("    $ {}", style("forge status").cyan());
    Ok(())
}
