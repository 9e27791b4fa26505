//! Plots check command

use colored::Colorize;

use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::services::plots::load_plots_from_path;

/// Parse the plots CSV and print the number of features
pub async fn plots_check(path: Option<String>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(|| get_config().plots.csv_path.clone());

    println!("{} {}", "Checking plot data...".yellow(), path.blue());

    let check_path = path.clone();
    let collection = tokio::task::spawn_blocking(move || load_plots_from_path(&check_path))
        .await
        .map_err(|e| CliError::CommandError(format!("check task failed: {}", e)))?
        .inspect_err(|e| println!("  {} {}", "Invalid plot data:".red(), e))?;

    println!(
        "  {} {} {}",
        "OK:".green().bold(),
        collection.features.len().to_string().cyan(),
        "plots parsed".green()
    );
    Ok(())
}
