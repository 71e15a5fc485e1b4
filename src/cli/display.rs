use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::models::project::{Organization, ProjectIdentity};

pub fn print_project_details(title: &str, org: &Organization, project: &ProjectIdentity) {
    println!("{}", style(title).bold());
    println!("-----------------");
    println!("Organization: {}", org.name);
    println!("Org Slug:     {}", org.slug);
    println!("Project:      {}", project.name);
    println!("Project Slug: {}", project.slug);
    println!("Repository:   {}", project.repo_url);
    println!();
}

pub fn print_no_selected_project() {
    println!("  {}", style("No project selected.").yellow());
    println!(
        "  {}",
        style("Select a project with the World CLI, or set project_id in your config.").dim()
    );
}

pub fn print_no_selected_organization() {
    println!("  {}", style("No organization selected.").yellow());
    println!(
        "  {}",
        style("Select an organization with the World CLI, or set organization_id in your config.").dim()
    );
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());
    spinner
}

pub fn print_success(msg: &str) {
    println!("  {} {}", style("OK").green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("  {} {}", style("ERROR").red().bold(), msg);
}
